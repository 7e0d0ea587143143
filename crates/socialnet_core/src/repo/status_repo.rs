//! Status repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts rely on the store's foreign key to reject unknown owners; there
//!   is no pre-check against `users`.
//! - `user_id` is never updated after insert.

use super::{ensure_connection_ready, map_insert_error, RepoError, RepoResult};
use crate::model::status::Status;
use rusqlite::{params, Connection, Row};

const STATUS_ENTITY: &str = "status";

const STATUS_SELECT_SQL: &str = "SELECT
    status_id,
    user_id,
    status_text
FROM statuses";

/// Repository interface for status CRUD operations.
pub trait StatusRepository {
    fn insert_status(&self, status: &Status) -> RepoResult<()>;
    fn get_status(&self, status_id: &str) -> RepoResult<Option<Status>>;
    fn update_text(&self, status_id: &str, status_text: &str) -> RepoResult<()>;
    fn delete_status(&self, status_id: &str) -> RepoResult<()>;
    fn list_statuses_for_user(&self, user_id: &str) -> RepoResult<Vec<Status>>;
    fn count_statuses_for_user(&self, user_id: &str) -> RepoResult<u64>;
}

/// SQLite-backed status repository.
pub struct SqliteStatusRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatusRepository<'conn> {
    /// Constructs a repository after checking the connection is migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StatusRepository for SqliteStatusRepository<'_> {
    fn insert_status(&self, status: &Status) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO statuses (
                    status_id,
                    user_id,
                    status_text
                ) VALUES (?1, ?2, ?3);",
                params![
                    status.status_id.as_str(),
                    status.user_id.as_str(),
                    status.status_text.as_str(),
                ],
            )
            .map_err(|err| map_insert_error(STATUS_ENTITY, &status.status_id, err))?;

        Ok(())
    }

    fn get_status(&self, status_id: &str) -> RepoResult<Option<Status>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STATUS_SELECT_SQL} WHERE status_id = ?1;"))?;
        let mut rows = stmt.query([status_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_status_row(row)?));
        }
        Ok(None)
    }

    fn update_text(&self, status_id: &str, status_text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE statuses SET status_text = ?2 WHERE status_id = ?1;",
            params![status_id, status_text],
        )?;

        if changed == 0 {
            return Err(not_found(status_id));
        }
        Ok(())
    }

    fn delete_status(&self, status_id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM statuses WHERE status_id = ?1;", [status_id])?;

        if changed == 0 {
            return Err(not_found(status_id));
        }
        Ok(())
    }

    fn list_statuses_for_user(&self, user_id: &str) -> RepoResult<Vec<Status>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STATUS_SELECT_SQL} WHERE user_id = ?1 ORDER BY status_id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            statuses.push(parse_status_row(row)?);
        }
        Ok(statuses)
    }

    fn count_statuses_for_user(&self, user_id: &str) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM statuses WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count.unsigned_abs())
    }
}

fn parse_status_row(row: &Row<'_>) -> RepoResult<Status> {
    Ok(Status {
        status_id: row.get("status_id")?,
        user_id: row.get("user_id")?,
        status_text: row.get("status_text")?,
    })
}

fn not_found(status_id: &str) -> RepoError {
    RepoError::NotFound {
        entity: STATUS_ENTITY,
        id: status_id.to_string(),
    }
}
