//! MySQL implementation of the TwoFactorAuthRepository trait.
//!
//! Backed by a `two_factor_auth` table keyed by user id:
//!
//! ```sql
//! CREATE TABLE two_factor_auth (
//!     user_id    CHAR(36)  NOT NULL PRIMARY KEY,
//!     verify_id  VARCHAR(255)  NULL,
//!     created_at TIMESTAMP NOT NULL,
//!     updated_at TIMESTAMP NOT NULL
//! );
//! ```
//!
//! `upsert_handle` takes a row lock (`SELECT ... FOR UPDATE`) inside a
//! transaction before deciding between insert and update, so concurrent
//! upserts for the same user serialize to a single record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tfa_core::domain::entities::two_factor_auth::TwoFactorAuth;
use tfa_core::errors::TwoFactorError;
use tfa_core::repositories::TwoFactorAuthRepository;

/// MySQL implementation of TwoFactorAuthRepository
pub struct MySqlTwoFactorAuthRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTwoFactorAuthRepository {
    /// Create a new MySQL association-record repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, error: sqlx::Error) -> TwoFactorError {
        TwoFactorError::Storage {
            message: format!("{}: {}", context, error),
        }
    }

    /// Convert a database row to a TwoFactorAuth entity.
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<TwoFactorAuth, TwoFactorError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| Self::storage_error("Failed to get user_id", e))?;

        Ok(TwoFactorAuth {
            user_id: Uuid::parse_str(&user_id).map_err(|e| TwoFactorError::Storage {
                message: format!("Invalid UUID: {}", e),
            })?,
            verify_id: row
                .try_get("verify_id")
                .map_err(|e| Self::storage_error("Failed to get verify_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::storage_error("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::storage_error("Failed to get updated_at", e))?,
        })
    }
}

#[async_trait]
impl TwoFactorAuthRepository for MySqlTwoFactorAuthRepository {
    async fn exists(&self, user_id: Uuid) -> Result<bool, TwoFactorError> {
        let row = sqlx::query("SELECT 1 FROM two_factor_auth WHERE user_id = ? LIMIT 1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("Existence check failed", e))?;

        Ok(row.is_some())
    }

    async fn get(&self, user_id: Uuid) -> Result<TwoFactorAuth, TwoFactorError> {
        let query = r#"
            SELECT user_id, verify_id, created_at, updated_at
            FROM two_factor_auth
            WHERE user_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("Database query failed", e))?;

        match row {
            Some(row) => Self::row_to_record(&row),
            None => Err(TwoFactorError::NotEnabled { user_id }),
        }
    }

    async fn create(
        &self,
        user_id: Uuid,
        verify_id: Option<String>,
    ) -> Result<TwoFactorAuth, TwoFactorError> {
        let record = match verify_id {
            Some(id) => TwoFactorAuth::with_handle(user_id, id),
            None => TwoFactorAuth::new(user_id),
        };

        let query = r#"
            INSERT INTO two_factor_auth (user_id, verify_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.user_id.to_string())
            .bind(record.verify_id.as_deref())
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("Failed to create association record", e))?;

        Ok(record)
    }

    async fn update_handle(
        &self,
        user_id: Uuid,
        verify_id: Option<String>,
    ) -> Result<TwoFactorAuth, TwoFactorError> {
        let updated_at = Utc::now();

        let query = r#"
            UPDATE two_factor_auth
            SET verify_id = ?, updated_at = ?
            WHERE user_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(verify_id.as_deref())
            .bind(updated_at)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("Failed to update association record", e))?;

        if result.rows_affected() == 0 {
            return Err(TwoFactorError::NotEnabled { user_id });
        }

        self.get(user_id).await
    }

    async fn upsert_handle(
        &self,
        user_id: Uuid,
        verify_id: String,
    ) -> Result<TwoFactorAuth, TwoFactorError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::storage_error("Failed to begin transaction", e))?;

        // Row lock serializes concurrent upserts for this user; the PK
        // constraint backstops the one-record-per-user invariant.
        let existing = sqlx::query("SELECT user_id FROM two_factor_auth WHERE user_id = ? FOR UPDATE")
            .bind(user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| Self::storage_error("Existence check failed", e))?;

        let now = Utc::now();
        if existing.is_some() {
            sqlx::query("UPDATE two_factor_auth SET verify_id = ?, updated_at = ? WHERE user_id = ?")
                .bind(verify_id.as_str())
                .bind(now)
                .bind(user_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| Self::storage_error("Failed to update association record", e))?;
        } else {
            sqlx::query(
                "INSERT INTO two_factor_auth (user_id, verify_id, created_at, updated_at) VALUES (?, ?, ?, ?)",
            )
            .bind(user_id.to_string())
            .bind(verify_id.as_str())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::storage_error("Failed to create association record", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| Self::storage_error("Failed to commit transaction", e))?;

        self.get(user_id).await
    }
}
