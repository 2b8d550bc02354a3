//! The narrow user capability consumed by two-factor providers.

use uuid::Uuid;

/// Capability a concrete account type must expose to participate in
/// two-factor authentication.
///
/// Providers depend on this interface by composition rather than requiring
/// anything of the account model itself: any type with a stable identifier
/// and an optional mobile contact can be verified. Whether two-factor is
/// enabled for a user is derived from the existence of an association
/// record, not stored on the user.
pub trait TwoFactorUser: Send + Sync {
    /// Stable unique identifier keying the association record.
    fn id(&self) -> Uuid;

    /// Mobile contact the verification token is delivered to, if any.
    fn mobile(&self) -> Option<&str>;
}
