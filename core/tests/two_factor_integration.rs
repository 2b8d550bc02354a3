//! Integration tests walking a verification session through its lifecycle

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use tfa_core::{
    EnablementMode, MockTwoFactorAuthRepository, SessionStatus, TwoFactorAuthRepository,
    TwoFactorConfig, TwoFactorError, TwoFactorProvider, TwoFactorUser, VerifyOptions,
    VerifyProvider, VerifyService, VerifyServiceError,
};

struct Account {
    id: Uuid,
    mobile: Option<String>,
}

impl TwoFactorUser for Account {
    fn id(&self) -> Uuid {
        self.id
    }

    fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }
}

/// Fake verify service modelling one session's lifecycle the way the real
/// provider behaves: a created session accepts exactly one matching token,
/// after which any further confirm is "already processed".
struct ScriptedVerifyService {
    expected_token: String,
    sessions: Mutex<std::collections::HashMap<String, bool>>, // handle -> processed
    counter: Mutex<u32>,
}

impl ScriptedVerifyService {
    fn new(expected_token: &str) -> Self {
        Self {
            expected_token: expected_token.to_string(),
            sessions: Mutex::new(std::collections::HashMap::new()),
            counter: Mutex::new(0),
        }
    }
}

#[async_trait]
impl VerifyService for ScriptedVerifyService {
    async fn create_session(
        &self,
        _recipient: &str,
        _options: &VerifyOptions,
    ) -> Result<String, VerifyServiceError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        let handle = format!("session-{}", counter);
        self.sessions.lock().unwrap().insert(handle.clone(), false);
        Ok(handle)
    }

    async fn confirm_session(
        &self,
        handle: &str,
        token: &str,
    ) -> Result<SessionStatus, VerifyServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        let processed = sessions
            .get_mut(handle)
            .ok_or_else(|| VerifyServiceError::new("Verify object not found"))?;

        if *processed {
            return Err(VerifyServiceError::new(
                "The token has already been processed.",
            ));
        }

        if token.len() < 6 || token.len() > 10 {
            return Err(VerifyServiceError::new(
                "Token should between 6 and 10 characters",
            ));
        }

        if token != self.expected_token {
            return Err(VerifyServiceError::new("The token is invalid."));
        }

        *processed = true;
        Ok(SessionStatus::Verified)
    }

    async fn delete_session(&self, handle: &str) -> Result<bool, VerifyServiceError> {
        Ok(self.sessions.lock().unwrap().remove(handle).is_some())
    }
}

fn account_with_mobile() -> Account {
    Account {
        id: Uuid::new_v4(),
        mobile: Some("+61412345678".to_string()),
    }
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let verify = Arc::new(ScriptedVerifyService::new("123456"));
    let repo = Arc::new(MockTwoFactorAuthRepository::new());
    let provider = VerifyProvider::new(
        Arc::clone(&verify),
        Arc::clone(&repo),
        TwoFactorConfig::with_mode(EnablementMode::Always),
    );
    let user = account_with_mobile();

    // NONE: nothing enabled, nothing to verify
    assert!(!provider.enabled(&user).await.unwrap());

    // PENDING after send_token
    provider.send_token(&user).await.unwrap();
    assert!(provider.enabled(&user).await.unwrap());

    // Malformed token: retryable, session still pending
    let error = provider.verify_token(&user, "12").await.unwrap_err();
    assert!(matches!(error, TwoFactorError::InvalidToken { .. }));
    assert!(error.is_retryable());

    // Wrong token: retryable, session still pending
    let error = provider.verify_token(&user, "654321").await.unwrap_err();
    assert!(matches!(error, TwoFactorError::InvalidToken { .. }));

    // Matching token: VERIFIED
    assert!(provider.verify_token(&user, "123456").await.unwrap());

    // Confirming again after the terminal outcome: ALREADY_PROCESSED
    let error = provider.verify_token(&user, "123456").await.unwrap_err();
    assert!(matches!(
        error,
        TwoFactorError::AlreadyProcessedToken { .. }
    ));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_resend_overwrites_stale_session() {
    let verify = Arc::new(ScriptedVerifyService::new("123456"));
    let repo = Arc::new(MockTwoFactorAuthRepository::new());
    let provider = VerifyProvider::new(
        verify,
        Arc::clone(&repo),
        TwoFactorConfig::with_mode(EnablementMode::Always),
    );
    let user = account_with_mobile();

    provider.send_token(&user).await.unwrap();
    let first_handle = repo.get(user.id()).await.unwrap().verify_id.unwrap();

    provider.send_token(&user).await.unwrap();
    let second_handle = repo.get(user.id()).await.unwrap().verify_id.unwrap();

    // A fresh send simply overwrites the stored handle; still one record
    assert_ne!(first_handle, second_handle);
    assert_eq!(repo.len().await, 1);

    assert!(provider.verify_token(&user, "123456").await.unwrap());
}

#[tokio::test]
async fn test_unregister_ends_the_association() {
    let verify = Arc::new(ScriptedVerifyService::new("123456"));
    let repo = Arc::new(MockTwoFactorAuthRepository::new());
    let provider = VerifyProvider::new(
        verify,
        Arc::clone(&repo),
        TwoFactorConfig::with_mode(EnablementMode::Always),
    );
    let user = account_with_mobile();

    provider.send_token(&user).await.unwrap();
    assert!(provider.unregister(&user).await.unwrap());

    // Record survives with no handle; the user is still opted in
    assert!(provider.enabled(&user).await.unwrap());
    let record = repo.get(user.id()).await.unwrap();
    assert!(record.verify_id.is_none());

    // Verifying without a pending session is a precondition error
    let error = provider.verify_token(&user, "123456").await.unwrap_err();
    assert!(matches!(error, TwoFactorError::NotEnabled { .. }));
}

#[tokio::test]
async fn test_per_user_mode_never_opts_in_implicitly() {
    let verify = Arc::new(ScriptedVerifyService::new("123456"));
    let repo = Arc::new(MockTwoFactorAuthRepository::new());
    let provider = VerifyProvider::new(
        verify,
        Arc::clone(&repo),
        TwoFactorConfig::default(), // per_user
    );
    let user = account_with_mobile();

    let error = provider.send_token(&user).await.unwrap_err();
    assert!(matches!(error, TwoFactorError::NotEnabled { .. }));
    assert!(!provider.enabled(&user).await.unwrap());
}
