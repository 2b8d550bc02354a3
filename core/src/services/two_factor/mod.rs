//! Two-factor provider module
//!
//! This module provides the complete provider-side workflow:
//! - The provider contract (`enabled`, `register`, `unregister`,
//!   `send_token`, `verify_token`)
//! - The remote verify-service abstraction and its session statuses
//! - The enablement policy deciding update vs. atomic upsert
//! - Classification of the remote service's generic failures into precise
//!   domain errors

mod classify;
mod config;
mod policy;
mod provider;
mod traits;
mod types;


pub use classify::{
    classify_confirm_failure, MSG_TOKEN_ALREADY_PROCESSED, MSG_TOKEN_EXPIRED, MSG_TOKEN_INVALID,
    MSG_TOKEN_LENGTH,
};
pub use config::{EnablementMode, TwoFactorConfig};
pub use policy::EnablementPolicy;
pub use provider::VerifyProvider;
pub use traits::{TwoFactorProvider, VerifyService};
pub use types::{SessionStatus, VerifyOptions, VerifyServiceError};
