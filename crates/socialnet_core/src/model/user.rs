//! User account record.

use serde::{Deserialize, Serialize};

/// Primary key of a user, supplied by the caller.
pub type UserId = String;

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub user_last_name: String,
    /// The only field that can change after creation.
    pub email: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_last_name: user_last_name.into(),
            email: email.into(),
        }
    }
}
