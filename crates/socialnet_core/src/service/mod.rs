//! Collection services: the transactional façade over the repositories.
//!
//! # Responsibility
//! - Wrap every repository call in exactly one transaction: immediate for
//!   writes, deferred for reads.
//! - Convert expected business failures (conflict, not found) into
//!   an `Outcome` plus one log line.
//! - Let storage failures propagate as `RepoError`.

pub mod outcome;
pub mod status_collection;
pub mod user_collection;

use self::outcome::Outcome;
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Opens the per-operation unit of work for a write. Dropping it without
/// `commit` rolls back.
fn begin(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Immediate,
    )?)
}

/// Read-only snapshot; takes no write lock.
fn begin_read(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Deferred,
    )?)
}

/// Commits only applied outcomes; anything else is rolled back on drop.
fn finish<T>(tx: Transaction<'_>, outcome: &Outcome<T>) -> RepoResult<()> {
    if outcome.succeeded() {
        tx.commit()?;
    }
    Ok(())
}

fn log_outcome<T>(event: &str, key: &str, id: &str, outcome: &Outcome<T>) {
    match outcome {
        Outcome::Applied(_) => info!("event={event} module=service status=ok {key}={id}"),
        Outcome::NotFound => error!(
            "event={event} module=service status=error error_code=not_found {key}={id}"
        ),
        Outcome::Conflict(kind) => error!(
            "event={event} module=service status=error error_code={kind} {key}={id}"
        ),
    }
}

fn log_lookup<T>(event: &str, key: &str, id: &str, found: &Option<T>) {
    if found.is_some() {
        info!("event={event} module=service status=ok {key}={id}");
    } else {
        error!("event={event} module=service status=error error_code=not_found {key}={id}");
    }
}
