//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - `insert_user` never overwrites an existing row.
//! - `delete_user` relies on `ON DELETE CASCADE` to remove dependent
//!   statuses in the same statement.

use super::{ensure_connection_ready, map_insert_error, RepoError, RepoResult};
use crate::model::user::User;
use rusqlite::{params, Connection, Row};

const USER_ENTITY: &str = "user";

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    user_name,
    user_last_name,
    email
FROM users";

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    fn insert_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, user_id: &str) -> RepoResult<Option<User>>;
    fn update_email(&self, user_id: &str, email: &str) -> RepoResult<()>;
    fn delete_user(&self, user_id: &str) -> RepoResult<()>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository after checking the connection is migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Skips readiness checks. Used inside transactions of an already
    /// verified connection.
    pub(crate) fn new_unchecked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &User) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO users (
                    user_id,
                    user_name,
                    user_last_name,
                    email
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.user_id.as_str(),
                    user.user_name.as_str(),
                    user.user_last_name.as_str(),
                    user.email.as_str(),
                ],
            )
            .map_err(|err| map_insert_error(USER_ENTITY, &user.user_id, err))?;

        Ok(())
    }

    fn get_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
        let mut rows = stmt.query([user_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn update_email(&self, user_id: &str, email: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET email = ?2 WHERE user_id = ?1;",
            params![user_id, email],
        )?;

        if changed == 0 {
            return Err(not_found(user_id));
        }
        Ok(())
    }

    fn delete_user(&self, user_id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1;", [user_id])?;

        if changed == 0 {
            return Err(not_found(user_id));
        }
        Ok(())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY user_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        user_id: row.get("user_id")?,
        user_name: row.get("user_name")?,
        user_last_name: row.get("user_last_name")?,
        email: row.get("email")?,
    })
}

fn not_found(user_id: &str) -> RepoError {
    RepoError::NotFound {
        entity: USER_ENTITY,
        id: user_id.to_string(),
    }
}
