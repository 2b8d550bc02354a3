//! In-memory implementation of TwoFactorAuthRepository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::two_factor_auth::TwoFactorAuth;
use crate::errors::TwoFactorError;

use super::trait_::TwoFactorAuthRepository;

/// Mock association-record repository.
///
/// Backed by a `HashMap` behind a `tokio::sync::RwLock`; holding the write
/// lock across the whole of `upsert_handle` gives the per-user atomicity
/// the trait requires. Call counters let tests assert which operations a
/// policy actually performed.
pub struct MockTwoFactorAuthRepository {
    records: Arc<RwLock<HashMap<Uuid, TwoFactorAuth>>>,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MockTwoFactorAuthRepository {
    /// Create a new empty mock repository.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }

    /// Seed the repository with an existing record.
    pub async fn insert(&self, record: TwoFactorAuth) {
        self.records.write().await.insert(record.user_id, record);
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the repository holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// How many times `create` was invoked (directly or via upsert).
    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// How many times `update_handle` was invoked (directly or via upsert).
    pub fn update_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTwoFactorAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TwoFactorAuthRepository for MockTwoFactorAuthRepository {
    async fn exists(&self, user_id: Uuid) -> Result<bool, TwoFactorError> {
        Ok(self.records.read().await.contains_key(&user_id))
    }

    async fn get(&self, user_id: Uuid) -> Result<TwoFactorAuth, TwoFactorError> {
        self.records
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(TwoFactorError::NotEnabled { user_id })
    }

    async fn create(
        &self,
        user_id: Uuid,
        verify_id: Option<String>,
    ) -> Result<TwoFactorAuth, TwoFactorError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.write().await;

        if records.contains_key(&user_id) {
            return Err(TwoFactorError::Storage {
                message: format!("association record already exists for user {}", user_id),
            });
        }

        let record = match verify_id {
            Some(id) => TwoFactorAuth::with_handle(user_id, id),
            None => TwoFactorAuth::new(user_id),
        };
        records.insert(user_id, record.clone());
        Ok(record)
    }

    async fn update_handle(
        &self,
        user_id: Uuid,
        verify_id: Option<String>,
    ) -> Result<TwoFactorAuth, TwoFactorError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.write().await;

        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorError::NotEnabled { user_id })?;
        match verify_id {
            Some(id) => record.set_handle(id),
            None => record.clear_handle(),
        }
        Ok(record.clone())
    }

    async fn upsert_handle(
        &self,
        user_id: Uuid,
        verify_id: String,
    ) -> Result<TwoFactorAuth, TwoFactorError> {
        // Single write lock spans the existence check and the write, which
        // serializes concurrent upserts for the same user.
        let mut records = self.records.write().await;

        match records.get_mut(&user_id) {
            Some(record) => {
                self.update_calls.fetch_add(1, Ordering::SeqCst);
                record.set_handle(verify_id);
                Ok(record.clone())
            }
            None => {
                self.create_calls.fetch_add(1, Ordering::SeqCst);
                let record = TwoFactorAuth::with_handle(user_id, verify_id);
                records.insert(user_id, record.clone());
                Ok(record)
            }
        }
    }
}
