//! Association record linking a user to their provider-issued verify handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The persisted link between one user and the remote verify service.
///
/// At most one record exists per user; `user_id` is the primary key.
/// `verify_id` references the in-flight (or most recent) verification
/// session at the remote provider and is absent until a token has been
/// sent. The session itself (token value, expiry, attempt count) lives
/// entirely on the provider side; this record is the sole local reference
/// to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorAuth {
    /// Identifier of the owning user (unique, one record per user)
    pub user_id: Uuid,

    /// Handle of the active verification session at the remote provider
    pub verify_id: Option<String>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl TwoFactorAuth {
    /// Creates a new association record with no active verification session.
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            verify_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new association record already pointing at a session.
    pub fn with_handle(user_id: Uuid, verify_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            verify_id: Some(verify_id.into()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Points the record at a new verification session, overwriting any
    /// previous handle.
    pub fn set_handle(&mut self, verify_id: impl Into<String>) {
        self.verify_id = Some(verify_id.into());
        self.updated_at = Utc::now();
    }

    /// Clears the stored handle after the remote session has been deleted.
    pub fn clear_handle(&mut self) {
        self.verify_id = None;
        self.updated_at = Utc::now();
    }

    /// Whether a verification session is currently referenced.
    pub fn has_pending_session(&self) -> bool {
        self.verify_id.is_some()
    }
}
