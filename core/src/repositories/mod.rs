//! Repository interfaces for association-record persistence.

pub mod two_factor;

pub use two_factor::{MockTwoFactorAuthRepository, TwoFactorAuthRepository};
