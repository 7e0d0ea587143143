//! Domain records for users and their status messages.
//!
//! # Invariants
//! - Identifiers are supplied by callers and never generated here.
//! - Identifiers are immutable once a record is stored.

pub mod status;
pub mod user;
