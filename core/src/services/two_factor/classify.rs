//! Classification of remote verify failures into precise domain errors.
//!
//! The remote service conflates malformed, wrong, expired, and replayed
//! tokens under one generic error distinguished only by message text.
//! Callers need to tell "prompt the user to retry" apart from "the session
//! is dead, restart the flow", so the message is matched exactly against
//! the known set in this one place instead of every caller
//! re-implementing string comparisons. A future upstream API with
//! structured error codes only requires changing this module.

use crate::errors::TwoFactorError;

use super::types::VerifyServiceError;

/// Remote message for a token outside the accepted length range
/// (verbatim, including the upstream grammar slip).
pub const MSG_TOKEN_LENGTH: &str = "Token should between 6 and 10 characters";

/// Remote message for a token that does not match the session's.
pub const MSG_TOKEN_INVALID: &str = "The token is invalid.";

/// Remote message for a session whose token lifetime elapsed.
pub const MSG_TOKEN_EXPIRED: &str = "The token has expired.";

/// Remote message for a session that already reached a terminal outcome.
pub const MSG_TOKEN_ALREADY_PROCESSED: &str = "The token has already been processed.";

/// Translate a confirm-session failure into exactly one domain error.
///
/// Unrecognized messages are re-raised unchanged as
/// [`TwoFactorError::Provider`]: silently misclassifying them could mask a
/// provider-side outage or a contract change.
pub fn classify_confirm_failure(error: VerifyServiceError) -> TwoFactorError {
    let message = error.message;
    match message.as_str() {
        MSG_TOKEN_LENGTH | MSG_TOKEN_INVALID => TwoFactorError::InvalidToken { message },
        MSG_TOKEN_EXPIRED => TwoFactorError::ExpiredToken { message },
        MSG_TOKEN_ALREADY_PROCESSED => TwoFactorError::AlreadyProcessedToken { message },
        _ => TwoFactorError::Provider { message },
    }
}
