//! Domain-specific error types for two-factor authentication.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by two-factor providers and the association store.
///
/// The three token variants (`InvalidToken`, `ExpiredToken`,
/// `AlreadyProcessedToken`) are produced by classifying the remote verify
/// service's generic failure messages; each carries the original remote
/// message so nothing is lost in translation. `Provider` is the fail-safe
/// for any remote failure that matched no known pattern; it is propagated
/// unchanged rather than guessed at.
#[derive(Error, Debug)]
pub enum TwoFactorError {
    #[error("No mobile phone number found for user {user_id}")]
    InvalidRecipient { user_id: Uuid },

    #[error("Invalid verification token: {message}")]
    InvalidToken { message: String },

    #[error("Verification token expired: {message}")]
    ExpiredToken { message: String },

    #[error("Verification token already processed: {message}")]
    AlreadyProcessedToken { message: String },

    #[error("Verify service failure: {message}")]
    Provider { message: String },

    #[error("Two-factor authentication is not enabled for user {user_id}")]
    NotEnabled { user_id: Uuid },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl TwoFactorError {
    /// Stable error code for programmatic handling in calling flows.
    pub fn code(&self) -> &'static str {
        match self {
            TwoFactorError::InvalidRecipient { .. } => "INVALID_RECIPIENT",
            TwoFactorError::InvalidToken { .. } => "INVALID_TOKEN",
            TwoFactorError::ExpiredToken { .. } => "EXPIRED_TOKEN",
            TwoFactorError::AlreadyProcessedToken { .. } => "ALREADY_PROCESSED_TOKEN",
            TwoFactorError::Provider { .. } => "PROVIDER_FAILURE",
            TwoFactorError::NotEnabled { .. } => "NOT_ENABLED",
            TwoFactorError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Whether the calling flow can recover by asking the user to retry the
    /// same session (re-enter the token), as opposed to restarting the flow.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TwoFactorError::InvalidToken { .. })
    }
}

pub type TwoFactorResult<T> = Result<T, TwoFactorError>;
