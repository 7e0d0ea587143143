//! User collection: transactional CRUD over users.
//!
//! # Invariants
//! - Each public call is one transaction; nothing is left half-written.
//! - Missing rows and duplicate keys never surface as `Err`.
//! - `delete_user` removes the user's statuses in the same transaction.

use super::outcome::Outcome;
use super::{begin, begin_read, finish, log_lookup, log_outcome};
use crate::model::user::User;
use crate::repo::status_repo::{SqliteStatusRepository, StatusRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::Connection;

/// Stateless façade over the `users` table.
pub struct UserCollection<'conn> {
    conn: &'conn Connection,
}

impl<'conn> UserCollection<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Inserts a new user.
    ///
    /// Returns `Outcome::Conflict(DuplicateKey)` when `user_id` is taken; the
    /// stored row is left untouched.
    pub fn add_user(&self, user: &User) -> RepoResult<Outcome<()>> {
        let tx = begin(self.conn)?;
        let outcome =
            Outcome::from_repo(SqliteUserRepository::new_unchecked(&tx).insert_user(user))?;
        finish(tx, &outcome)?;
        log_outcome("user_create", "user_id", &user.user_id, &outcome);
        Ok(outcome)
    }

    /// Looks up one user. `None` is the not-found sentinel.
    pub fn search_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        let tx = begin_read(self.conn)?;
        let found = SqliteUserRepository::new_unchecked(&tx).get_user(user_id)?;
        tx.commit()?;
        log_lookup("user_search", "user_id", user_id, &found);
        Ok(found)
    }

    /// Deletes a user and, through the cascading foreign key, all of its
    /// statuses. Applied value is the number of statuses removed with it.
    pub fn delete_user(&self, user_id: &str) -> RepoResult<Outcome<u64>> {
        let tx = begin(self.conn)?;
        let cascaded =
            SqliteStatusRepository::new_unchecked(&tx).count_statuses_for_user(user_id)?;
        let outcome = Outcome::from_repo(
            SqliteUserRepository::new_unchecked(&tx)
                .delete_user(user_id)
                .map(|()| cascaded),
        )?;
        finish(tx, &outcome)?;
        log_outcome("user_delete", "user_id", user_id, &outcome);
        Ok(outcome)
    }

    pub fn update_email(&self, user_id: &str, email: &str) -> RepoResult<Outcome<()>> {
        let tx = begin(self.conn)?;
        let outcome = Outcome::from_repo(
            SqliteUserRepository::new_unchecked(&tx).update_email(user_id, email),
        )?;
        finish(tx, &outcome)?;
        log_outcome("user_update_email", "user_id", user_id, &outcome);
        Ok(outcome)
    }

    /// All users ordered by `user_id`.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        let tx = begin_read(self.conn)?;
        let users = SqliteUserRepository::new_unchecked(&tx).list_users()?;
        tx.commit()?;
        Ok(users)
    }
}
