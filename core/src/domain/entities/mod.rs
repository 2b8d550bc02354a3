//! Domain entities representing persisted two-factor state.

pub mod two_factor_auth;

// Re-export commonly used types
pub use two_factor_auth::TwoFactorAuth;
