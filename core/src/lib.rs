//! # Two-Factor Auth Core
//!
//! Domain layer for a pluggable two-factor authentication module. This crate
//! contains the association-record entity, the repository interface for
//! persisting it, the verification-provider contract against a remote verify
//! service, the enablement policy, and the error types shared by provider
//! implementations.
//!
//! Transport (HTTP clients) and durable storage live in the infrastructure
//! crate; this crate only defines the traits they implement.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{TwoFactorAuth, TwoFactorUser};
pub use errors::{TwoFactorError, TwoFactorResult};
pub use repositories::{MockTwoFactorAuthRepository, TwoFactorAuthRepository};
pub use services::{
    classify_confirm_failure, EnablementMode, EnablementPolicy, SessionStatus, TwoFactorConfig,
    TwoFactorProvider, VerifyOptions, VerifyProvider, VerifyService, VerifyServiceError,
};
