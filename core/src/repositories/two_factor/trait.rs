//! Association-record repository trait.
//!
//! Defines the persistence contract for [`TwoFactorAuth`] records. The trait
//! is async-first and keeps the abstraction boundary between the domain and
//! whatever storage backs it; the only transactional requirement lives
//! behind [`upsert_handle`](TwoFactorAuthRepository::upsert_handle).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::two_factor_auth::TwoFactorAuth;
use crate::errors::TwoFactorError;

/// Repository contract for association-record persistence.
///
/// Records are keyed uniquely per user, so no cross-user coordination is
/// required of implementations. The one point of mandatory mutual exclusion
/// is `upsert_handle`: its existence check and subsequent create-or-update
/// must be atomic per user, otherwise two concurrent token sends for the
/// same new user can both observe "does not exist" and both attempt to
/// create a record.
#[async_trait]
pub trait TwoFactorAuthRepository: Send + Sync {
    /// Check whether an association record exists for the user.
    async fn exists(&self, user_id: Uuid) -> Result<bool, TwoFactorError>;

    /// Fetch the user's association record.
    ///
    /// # Returns
    /// * `Ok(TwoFactorAuth)` - The record
    /// * `Err(TwoFactorError::NotEnabled)` - No record exists for the user
    async fn get(&self, user_id: Uuid) -> Result<TwoFactorAuth, TwoFactorError>;

    /// Create a new association record for the user.
    ///
    /// Creating a second record for the same user is a storage error; the
    /// one-record-per-user invariant is enforced by the backing store.
    async fn create(
        &self,
        user_id: Uuid,
        verify_id: Option<String>,
    ) -> Result<TwoFactorAuth, TwoFactorError>;

    /// Overwrite the stored handle of an existing record.
    ///
    /// Never creates a record.
    ///
    /// # Returns
    /// * `Ok(TwoFactorAuth)` - The updated record
    /// * `Err(TwoFactorError::NotEnabled)` - No record exists for the user
    async fn update_handle(
        &self,
        user_id: Uuid,
        verify_id: Option<String>,
    ) -> Result<TwoFactorAuth, TwoFactorError>;

    /// Create the record with the given handle if absent, else overwrite
    /// the stored handle.
    ///
    /// Implementations MUST make the existence check and the write atomic
    /// for the given user (a single transaction or lock scope), so that
    /// concurrent upserts for the same user serialize to exactly one
    /// record with the last writer's handle.
    async fn upsert_handle(
        &self,
        user_id: Uuid,
        verify_id: String,
    ) -> Result<TwoFactorAuth, TwoFactorError>;
}
