//! Enablement policy deciding how a new session handle is persisted.

use uuid::Uuid;

use crate::domain::entities::two_factor_auth::TwoFactorAuth;
use crate::errors::TwoFactorResult;
use crate::repositories::two_factor::TwoFactorAuthRepository;

use super::config::EnablementMode;

/// Decides, from the configured [`EnablementMode`], whether storing a
/// session handle is a plain update of a pre-existing record or an
/// idempotent create-or-update.
///
/// In `per_user` mode a missing record is a caller error (`NotEnabled`),
/// never an implicit opt-in. In `always` mode the repository's atomic
/// upsert is used, so two concurrent sends for the same new user serialize
/// to a single record.
#[derive(Debug, Clone, Copy)]
pub struct EnablementPolicy {
    mode: EnablementMode,
}

impl EnablementPolicy {
    /// Create a policy for the given mode.
    pub fn new(mode: EnablementMode) -> Self {
        Self { mode }
    }

    /// The configured mode.
    pub fn mode(&self) -> EnablementMode {
        self.mode
    }

    /// Store a freshly issued session handle for the user.
    pub async fn store_handle<R: TwoFactorAuthRepository + ?Sized>(
        &self,
        repository: &R,
        user_id: Uuid,
        verify_id: String,
    ) -> TwoFactorResult<TwoFactorAuth> {
        match self.mode {
            EnablementMode::PerUser => repository.update_handle(user_id, Some(verify_id)).await,
            EnablementMode::Always => repository.upsert_handle(user_id, verify_id).await,
        }
    }
}
