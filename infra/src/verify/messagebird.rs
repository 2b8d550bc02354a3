//! MessageBird Verify REST client.
//!
//! Implements the core `VerifyService` trait against the MessageBird
//! Verify API:
//!
//! - `POST /verify` creates a session and delivers a token
//! - `GET /verify/{id}?token=...` confirms a token against a session
//! - `DELETE /verify/{id}` deletes a session
//!
//! Non-2xx responses carry an `errors` array; the first error description
//! becomes the `VerifyServiceError` message verbatim, which is what the
//! core's failure classification matches against.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use tfa_core::services::{SessionStatus, VerifyOptions, VerifyService, VerifyServiceError};

use super::mask_recipient;
use crate::InfrastructureError;

/// Default MessageBird REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://rest.messagebird.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// MessageBird Verify client configuration
#[derive(Debug, Clone)]
pub struct MessageBirdConfig {
    /// MessageBird live access key
    pub access_key: String,
    /// API endpoint, overridable for testing
    pub endpoint: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl MessageBirdConfig {
    /// Create a configuration with the default endpoint and timeout.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `MESSAGEBIRD_ACCESS_KEY` (required), `MESSAGEBIRD_ENDPOINT`
    /// and `MESSAGEBIRD_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();

        let access_key = std::env::var("MESSAGEBIRD_ACCESS_KEY").map_err(|_| {
            InfrastructureError::Config("MESSAGEBIRD_ACCESS_KEY not set".to_string())
        })?;

        Ok(Self {
            access_key,
            endpoint: std::env::var("MESSAGEBIRD_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            request_timeout_secs: std::env::var("MESSAGEBIRD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Request body for creating a verification session
#[derive(Debug, Serialize)]
pub(crate) struct CreateVerifyRequest<'a> {
    pub recipient: &'a str,
    #[serde(flatten)]
    pub options: &'a VerifyOptions,
}

/// Verify object as returned by the API
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyObject {
    pub id: String,
    pub status: SessionStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    pub description: String,
}

/// Turn a non-2xx response body into the generic verify failure.
///
/// The first error description is kept verbatim so the core's message
/// classification sees exactly what the API said.
pub(crate) fn parse_error_body(status: StatusCode, body: &str) -> VerifyServiceError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => {
            let error = &parsed.errors[0];
            debug!(
                code = error.code,
                description = %error.description,
                "MessageBird API error"
            );
            VerifyServiceError::new(error.description.clone())
        }
        _ => VerifyServiceError::new(format!("Verify request failed with status {}", status)),
    }
}

/// MessageBird implementation of the remote verify service
pub struct MessageBirdVerifyService {
    client: Client,
    config: MessageBirdConfig,
}

impl MessageBirdVerifyService {
    /// Create a new client.
    pub fn new(config: MessageBirdConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("MessageBird Verify client initialized");

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MessageBirdConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> String {
        format!("AccessKey {}", self.config.access_key)
    }

    async fn read_verify_object(response: Response) -> Result<VerifyObject, VerifyServiceError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VerifyServiceError::new(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(parse_error_body(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| VerifyServiceError::new(format!("Unexpected response body: {}", e)))
    }
}

#[async_trait]
impl VerifyService for MessageBirdVerifyService {
    async fn create_session(
        &self,
        recipient: &str,
        options: &VerifyOptions,
    ) -> Result<String, VerifyServiceError> {
        debug!(
            recipient = %mask_recipient(recipient),
            "Creating MessageBird verification session"
        );

        let response = self
            .client
            .post(self.url("verify"))
            .header("Authorization", self.auth_header())
            .json(&CreateVerifyRequest { recipient, options })
            .send()
            .await
            .map_err(|e| VerifyServiceError::new(format!("HTTP request failed: {}", e)))?;

        let object = Self::read_verify_object(response).await?;

        info!(
            session_id = %object.id,
            recipient = %mask_recipient(recipient),
            event = "verify_session_created",
            "Created verification session"
        );

        Ok(object.id)
    }

    async fn confirm_session(
        &self,
        handle: &str,
        token: &str,
    ) -> Result<SessionStatus, VerifyServiceError> {
        debug!(session_id = %handle, "Confirming MessageBird verification session");

        let response = self
            .client
            .get(self.url(&format!("verify/{}", handle)))
            .header("Authorization", self.auth_header())
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| VerifyServiceError::new(format!("HTTP request failed: {}", e)))?;

        let object = Self::read_verify_object(response).await?;

        info!(
            session_id = %handle,
            status = ?object.status,
            event = "verify_session_confirmed",
            "Confirmed verification session"
        );

        Ok(object.status)
    }

    async fn delete_session(&self, handle: &str) -> Result<bool, VerifyServiceError> {
        debug!(session_id = %handle, "Deleting MessageBird verification session");

        let response = self
            .client
            .delete(self.url(&format!("verify/{}", handle)))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| VerifyServiceError::new(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status, &body));
        }

        info!(
            session_id = %handle,
            event = "verify_session_deleted",
            "Deleted verification session"
        );

        Ok(true)
    }
}
