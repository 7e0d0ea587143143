//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL details for `users` and `statuses` inside the core crate.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Repositories never open transactions; callers pass a `Transaction`
//!   (which derefs to `Connection`) when atomicity is needed.
//! - Constraint violations surface as `RepoError::Conflict`, missing rows as
//!   `RepoError::NotFound`. Everything else stays a `RepoError::Db`.

pub mod status_repo;
pub mod user_repo;

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use rusqlite::{ffi, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Why an insert was refused by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Primary key already taken.
    DuplicateKey,
    /// Foreign key points at a user that does not exist.
    UnknownOwner,
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey => f.write_str("duplicate_key"),
            Self::UnknownOwner => f.write_str("unknown_owner"),
        }
    }
}

/// Repository error for user/status persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: String,
    },
    Conflict {
        entity: &'static str,
        id: String,
        kind: ConflictKind,
    },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    ForeignKeysDisabled,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict { entity, id, kind } => {
                write!(f, "{entity} `{id}` rejected by store: {kind}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with `open_db`"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::ForeignKeysDisabled => {
                write!(f, "connection has foreign key enforcement disabled")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Classifies a failed write. Returns `None` for anything that is not a
/// key or foreign-key constraint.
pub(crate) fn conflict_kind(err: &rusqlite::Error) -> Option<ConflictKind> {
    match err {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation =>
        {
            match inner.extended_code {
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    Some(ConflictKind::DuplicateKey)
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConflictKind::UnknownOwner),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Maps an insert failure onto `RepoError::Conflict` when it is one.
pub(crate) fn map_insert_error(
    entity: &'static str,
    id: &str,
    err: rusqlite::Error,
) -> RepoError {
    match conflict_kind(&err) {
        Some(kind) => RepoError::Conflict {
            entity,
            id: id.to_string(),
            kind,
        },
        None => err.into(),
    }
}

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("users", &["user_id", "user_name", "user_last_name", "email"]),
    ("statuses", &["status_id", "user_id", "status_text"]),
];

/// Verifies that `conn` was opened through `open_db`/`open_db_in_memory`.
///
/// Checks schema version, table shape and foreign-key enforcement. Cascade
/// delete silently stops working without the latter, so it is rejected here.
pub fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    let foreign_keys: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if foreign_keys != 1 {
        return Err(RepoError::ForeignKeysDisabled);
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
