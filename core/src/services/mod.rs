//! Business services containing the two-factor provider logic.

pub mod two_factor;

// Re-export commonly used types
pub use two_factor::{
    classify_confirm_failure, EnablementMode, EnablementPolicy, SessionStatus, TwoFactorConfig,
    TwoFactorProvider, VerifyOptions, VerifyProvider, VerifyService, VerifyServiceError,
};
