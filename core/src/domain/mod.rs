//! Domain layer containing the association entity and the user capability.

pub mod entities;
pub mod user;

// Re-export commonly used domain types
pub use entities::*;
pub use user::TwoFactorUser;
