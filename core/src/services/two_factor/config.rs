//! Configuration for the two-factor provider.

use serde::{Deserialize, Serialize};

use super::types::VerifyOptions;

/// How association records come into existence when a handle is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnablementMode {
    /// Only users explicitly opted in have a record; storing a handle for
    /// a user without one is an error, never an implicit opt-in.
    PerUser,
    /// Every user gets a record on first token send (atomic upsert).
    Always,
}

impl Default for EnablementMode {
    fn default() -> Self {
        EnablementMode::PerUser
    }
}

/// Configuration handed to the provider at assembly time.
///
/// Passed in explicitly by the composition root; business logic never
/// reaches into ambient configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwoFactorConfig {
    /// Whether handle storage updates existing records only (`per_user`)
    /// or creates them on demand (`always`)
    #[serde(default)]
    pub mode: EnablementMode,

    /// Options forwarded unmodified to the remote service when creating a
    /// verification session
    #[serde(default)]
    pub options: VerifyOptions,
}

impl TwoFactorConfig {
    /// Configuration with the given mode and default options.
    pub fn with_mode(mode: EnablementMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }
}
