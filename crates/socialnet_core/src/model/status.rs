//! Status message record owned by a user.
//!
//! # Invariants
//! - `user_id` must reference an existing user when the status is created;
//!   the store enforces this, not the model.
//! - Deleting the owning user deletes the status.

use serde::{Deserialize, Serialize};

/// Primary key of a status message, supplied by the caller.
pub type StatusId = String;

/// One row of the `statuses` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status_id: StatusId,
    /// Owning user. Fixed at creation.
    pub user_id: String,
    pub status_text: String,
}

impl Status {
    pub fn new(
        status_id: impl Into<String>,
        user_id: impl Into<String>,
        status_text: impl Into<String>,
    ) -> Self {
        Self {
            status_id: status_id.into(),
            user_id: user_id.into(),
            status_text: status_text.into(),
        }
    }
}
