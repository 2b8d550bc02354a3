//! Provider implementation against a remote verify service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::user::TwoFactorUser;
use crate::errors::{TwoFactorError, TwoFactorResult};
use crate::repositories::two_factor::TwoFactorAuthRepository;

use super::classify::classify_confirm_failure;
use super::config::TwoFactorConfig;
use super::policy::EnablementPolicy;
use super::traits::{TwoFactorProvider, VerifyService};
use super::types::SessionStatus;

/// Two-factor provider delegating token issuance and confirmation to a
/// remote verify service.
///
/// Holds the remote service, the association-record repository, and the
/// assembly-time configuration. The only state it owns locally is the
/// per-user session handle, persisted through the [`EnablementPolicy`].
pub struct VerifyProvider<V: VerifyService, R: TwoFactorAuthRepository> {
    /// Remote verify service
    verify_service: Arc<V>,
    /// Association-record persistence
    repository: Arc<R>,
    /// Assembly-time configuration
    config: TwoFactorConfig,
    /// Policy deciding update vs. upsert when storing a handle
    policy: EnablementPolicy,
}

impl<V: VerifyService, R: TwoFactorAuthRepository> VerifyProvider<V, R> {
    /// Create a new provider.
    ///
    /// # Arguments
    ///
    /// * `verify_service` - Remote verify service implementation
    /// * `repository` - Association-record repository implementation
    /// * `config` - Enablement mode and session options
    pub fn new(verify_service: Arc<V>, repository: Arc<R>, config: TwoFactorConfig) -> Self {
        let policy = EnablementPolicy::new(config.mode);
        Self {
            verify_service,
            repository,
            config,
            policy,
        }
    }
}

#[async_trait]
impl<V: VerifyService, R: TwoFactorAuthRepository> TwoFactorProvider for VerifyProvider<V, R> {
    async fn enabled(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<bool> {
        self.repository.exists(user.id()).await
    }

    async fn register(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<()> {
        // The remote verify service has no registration step; records are
        // created by the enablement policy on first token send.
        tracing::debug!(
            user_id = %user.id(),
            event = "register_noop",
            "Register is a no-op for verify-service providers"
        );
        Ok(())
    }

    async fn unregister(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<bool> {
        let record = self.repository.get(user.id()).await?;

        let Some(handle) = record.verify_id else {
            // No pending session, nothing to delete remotely
            return Ok(false);
        };

        // Remote delete strictly before the local clear: a failure here
        // must leave the handle in place or the live remote session would
        // be orphaned.
        let deleted = self
            .verify_service
            .delete_session(&handle)
            .await
            .map_err(|e| TwoFactorError::Provider { message: e.message })?;

        self.repository.update_handle(user.id(), None).await?;

        tracing::info!(
            user_id = %user.id(),
            event = "session_unregistered",
            remote_deleted = deleted,
            "Cleared verification session handle"
        );

        Ok(deleted)
    }

    async fn send_token(&self, user: &dyn TwoFactorUser) -> TwoFactorResult<()> {
        let user_id = user.id();

        let mobile = match user.mobile() {
            Some(mobile) if !mobile.is_empty() => mobile,
            _ => {
                tracing::warn!(
                    user_id = %user_id,
                    event = "send_token_no_recipient",
                    "Token send attempted for user without a mobile contact"
                );
                return Err(TwoFactorError::InvalidRecipient { user_id });
            }
        };

        // The remote create must complete and return a handle before
        // anything is persisted; on failure the record keeps its previous
        // value.
        let handle = self
            .verify_service
            .create_session(mobile, &self.config.options)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user_id,
                    error = %e,
                    event = "session_create_failed",
                    "Remote verify service rejected session creation"
                );
                TwoFactorError::Provider { message: e.message }
            })?;

        self.policy
            .store_handle(self.repository.as_ref(), user_id, handle)
            .await?;

        tracing::info!(
            user_id = %user_id,
            event = "token_sent",
            "Verification token issued and session handle stored"
        );

        Ok(())
    }

    async fn verify_token(&self, user: &dyn TwoFactorUser, token: &str) -> TwoFactorResult<bool> {
        let user_id = user.id();
        let record = self.repository.get(user_id).await?;
        let handle = record
            .verify_id
            .ok_or(TwoFactorError::NotEnabled { user_id })?;

        let status = self
            .verify_service
            .confirm_session(&handle, token)
            .await
            .map_err(|e| {
                let error = classify_confirm_failure(e);
                tracing::warn!(
                    user_id = %user_id,
                    code = error.code(),
                    event = "token_verification_failed",
                    "Remote verify service rejected token confirmation"
                );
                error
            })?;

        let verified = status == SessionStatus::Verified;
        tracing::info!(
            user_id = %user_id,
            event = "token_verified",
            verified = verified,
            "Token confirmation completed"
        );

        Ok(verified)
    }
}
