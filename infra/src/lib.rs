//! # Infrastructure Layer
//!
//! Concrete implementations of the `tfa_core` traits:
//!
//! - **Verify**: MessageBird Verify REST client implementing
//!   [`VerifyService`](tfa_core::services::VerifyService)
//! - **Database**: MySQL association store implementing
//!   [`TwoFactorAuthRepository`](tfa_core::repositories::TwoFactorAuthRepository)
//!   using SQLx

pub mod database;
pub mod verify;

// Re-export core types for convenience
pub use tfa_core::errors::*;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
