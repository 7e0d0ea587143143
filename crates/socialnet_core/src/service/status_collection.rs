//! Status collection: transactional CRUD over status messages.
//!
//! # Invariants
//! - `add_status` does not look up the owner first; the foreign key decides.
//! - Duplicate `status_id` and unknown owner both yield `succeeded() == false`.

use super::outcome::Outcome;
use super::{begin, begin_read, finish, log_lookup, log_outcome};
use crate::model::status::Status;
use crate::repo::status_repo::{SqliteStatusRepository, StatusRepository};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::Connection;

/// Stateless façade over the `statuses` table.
pub struct StatusCollection<'conn> {
    conn: &'conn Connection,
}

impl<'conn> StatusCollection<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub fn add_status(&self, status: &Status) -> RepoResult<Outcome<()>> {
        let tx = begin(self.conn)?;
        let outcome =
            Outcome::from_repo(SqliteStatusRepository::new_unchecked(&tx).insert_status(status))?;
        finish(tx, &outcome)?;
        log_outcome("status_create", "status_id", &status.status_id, &outcome);
        Ok(outcome)
    }

    pub fn search_status(&self, status_id: &str) -> RepoResult<Option<Status>> {
        let tx = begin_read(self.conn)?;
        let found = SqliteStatusRepository::new_unchecked(&tx).get_status(status_id)?;
        tx.commit()?;
        log_lookup("status_search", "status_id", status_id, &found);
        Ok(found)
    }

    pub fn delete_status(&self, status_id: &str) -> RepoResult<Outcome<()>> {
        let tx = begin(self.conn)?;
        let outcome = Outcome::from_repo(
            SqliteStatusRepository::new_unchecked(&tx).delete_status(status_id),
        )?;
        finish(tx, &outcome)?;
        log_outcome("status_delete", "status_id", status_id, &outcome);
        Ok(outcome)
    }

    pub fn update_status_text(
        &self,
        status_id: &str,
        status_text: &str,
    ) -> RepoResult<Outcome<()>> {
        let tx = begin(self.conn)?;
        let outcome = Outcome::from_repo(
            SqliteStatusRepository::new_unchecked(&tx).update_text(status_id, status_text),
        )?;
        finish(tx, &outcome)?;
        log_outcome("status_update_text", "status_id", status_id, &outcome);
        Ok(outcome)
    }

    /// Statuses owned by `user_id`, ordered by `status_id`. Empty for an
    /// unknown user.
    pub fn list_statuses_for_user(&self, user_id: &str) -> RepoResult<Vec<Status>> {
        let tx = begin_read(self.conn)?;
        let statuses =
            SqliteStatusRepository::new_unchecked(&tx).list_statuses_for_user(user_id)?;
        tx.commit()?;
        Ok(statuses)
    }
}
