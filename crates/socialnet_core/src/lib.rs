//! Core domain logic for the social network store.
//! This crate is the single source of truth for user/status invariants.

pub mod db;
pub mod loader;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use loader::{
    load_statuses_csv, load_statuses_from_reader, load_users_csv, load_users_from_reader,
    LoadError, LoadReport, LoadResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::status::{Status, StatusId};
pub use model::user::{User, UserId};
pub use repo::status_repo::{SqliteStatusRepository, StatusRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{ConflictKind, RepoError, RepoResult};
pub use service::outcome::Outcome;
pub use service::status_collection::StatusCollection;
pub use service::user_collection::UserCollection;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
