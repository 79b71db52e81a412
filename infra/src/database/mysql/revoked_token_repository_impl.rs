//! MySQL implementation of the RevokedTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use oc_core::domain::entities::token::RevokedToken;
use oc_core::errors::{DomainError, DomainResult};
use oc_core::repositories::RevokedTokenRepository;

/// MySQL-backed access token blacklist
pub struct MySqlRevokedTokenRepository {
    pool: MySqlPool,
}

impl MySqlRevokedTokenRepository {
    /// Create a repository over the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenRepository for MySqlRevokedTokenRepository {
    async fn insert(&self, entry: RevokedToken) -> DomainResult<()> {
        // token_hash carries a unique index; re-revoking the same
        // token must stay a no-op.
        let query = r#"
            INSERT IGNORE INTO revoked_tokens (
                id, token_hash, user_id, expires_at, revoked_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(entry.id.to_string())
            .bind(&entry.token_hash)
            .bind(entry.user_id)
            .bind(entry.expires_at)
            .bind(entry.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(())
    }

    async fn contains(&self, token_hash: &str) -> DomainResult<bool> {
        let query =
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_hash = ?) AS present";

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        let present: i64 = row.try_get("present").map_err(DomainError::storage)?;
        Ok(present == 1)
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let query = "DELETE FROM revoked_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(result.rows_affected() as usize)
    }
}
