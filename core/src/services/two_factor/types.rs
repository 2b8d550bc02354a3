//! Types shared by verify-service implementations and the provider.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Generic failure raised by the remote verify service.
///
/// The upstream API reports every non-success (malformed token, wrong
/// token, expired session, replayed session, outage) through one error
/// shape whose only discriminator is a human-readable message. The message
/// is kept verbatim so it can be classified once, centrally, at the
/// provider boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct VerifyServiceError {
    /// Free-text failure message exactly as the remote service reported it
    pub message: String,
}

impl VerifyServiceError {
    /// Create a failure carrying the remote service's message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Terminal and in-flight statuses a verification session reports.
///
/// Only `Verified` counts as a successful verification; any other status
/// returned without an error is a non-success, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Token delivered, awaiting confirmation
    Sent,
    /// Token confirmed successfully
    Verified,
    /// Token lifetime elapsed before confirmation
    Expired,
    /// Delivery or confirmation failed on the provider side
    Failed,
    /// Session was deleted
    Deleted,
    /// Any status not otherwise recognized; never a successful verification
    #[serde(other)]
    Unknown,
}

/// Options passed through unmodified when creating a verification session.
///
/// The typed fields cover the options common to verify providers; anything
/// else rides along in `extra`. The provider never inspects these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyOptions {
    /// Sender name or number shown to the recipient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originator: Option<String>,

    /// Seconds before the issued token expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Number of digits in the issued token
    #[serde(rename = "tokenLength", skip_serializing_if = "Option::is_none")]
    pub token_length: Option<u8>,

    /// Language of the delivery message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Provider-specific options forwarded as-is
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_deserializes_lowercase() {
        let status: SessionStatus = serde_json::from_str("\"verified\"").unwrap();
        assert_eq!(status, SessionStatus::Verified);

        let status: SessionStatus = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(status, SessionStatus::Sent);
    }

    #[test]
    fn test_unrecognized_status_falls_back_to_unknown() {
        let status: SessionStatus = serde_json::from_str("\"buffered\"").unwrap();
        assert_eq!(status, SessionStatus::Unknown);
    }

    #[test]
    fn test_verify_options_serializes_only_set_fields() {
        let options = VerifyOptions {
            originator: Some("AcmeCorp".to_string()),
            timeout: Some(60),
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["originator"], "AcmeCorp");
        assert_eq!(json["timeout"], 60);
        assert!(json.get("tokenLength").is_none());
        assert!(json.get("language").is_none());
    }

    #[test]
    fn test_verify_options_extra_fields_are_flattened() {
        let mut options = VerifyOptions::default();
        options
            .extra
            .insert("type".to_string(), serde_json::json!("sms"));
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["type"], "sms");
    }
}
