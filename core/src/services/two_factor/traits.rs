//! Traits for the provider contract and the remote verify service.

use async_trait::async_trait;

use crate::domain::user::TwoFactorUser;
use crate::errors::TwoFactorResult;

use super::types::{SessionStatus, VerifyOptions, VerifyServiceError};

/// The two-factor provider contract.
///
/// Polymorphic over provider implementations; [`VerifyProvider`] against a
/// MessageBird-style remote verify service is the concrete variant shipped
/// here, but anything honoring these semantics plugs in. The trait is
/// object-safe so a calling flow can hold a `dyn TwoFactorProvider`.
///
/// [`VerifyProvider`]: super::provider::VerifyProvider
#[async_trait]
pub trait TwoFactorProvider: Send + Sync {
    /// Whether two-factor authentication is enabled for the user, i.e.
    /// whether an association record exists. No side effects.
    async fn enabled(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<bool>;

    /// Provider-side setup hook before first use. Providers with no
    /// registration step implement this as a no-op; re-registration must
    /// not fail.
    async fn register(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<()>;

    /// Delete the active verification session at the remote provider, then
    /// clear the stored handle. The remote delete happens first; if it
    /// fails the handle stays in place, since clearing a handle that still
    /// maps to a live remote session would orphan it.
    ///
    /// Returns whether the remote delete succeeded.
    async fn unregister(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<bool>;

    /// Issue a new token to the user's mobile contact and store the
    /// returned session handle. Fails with `InvalidRecipient` before any
    /// remote call when the user has no usable contact; a provider-side
    /// failure leaves the stored handle unchanged.
    async fn send_token(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<()>;

    /// Confirm a user-supplied token against the stored session.
    ///
    /// Returns `true` iff the session status is verified; any other
    /// non-error status returns `false`. Remote failures are classified
    /// into `InvalidToken` / `ExpiredToken` / `AlreadyProcessedToken`, or
    /// re-raised unchanged when the message matches no known pattern.
    async fn verify_token(&self, user: &dyn TwoFactorUser, token: &str) -> TwoFactorResult<bool>;
}

/// The remote verification service, reduced to the three operations the
/// provider needs. Transport, authentication, and timeouts belong to the
/// implementation.
#[async_trait]
pub trait VerifyService: Send + Sync {
    /// Create a verification session delivering a token to `recipient`.
    /// Returns the provider-assigned session handle.
    async fn create_session(
        &self,
        recipient: &str,
        options: &VerifyOptions,
    ) -> Result<String, VerifyServiceError>;

    /// Submit a token for confirmation against an existing session.
    async fn confirm_session(
        &self,
        handle: &str,
        token: &str,
    ) -> Result<SessionStatus, VerifyServiceError>;

    /// Delete a verification session. Returns whether the remote delete
    /// succeeded.
    async fn delete_session(&self, handle: &str) -> Result<bool, VerifyServiceError>;
}
