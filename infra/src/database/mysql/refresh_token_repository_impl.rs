//! MySQL implementation of the RefreshTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use oc_core::domain::entities::token::RefreshToken;
use oc_core::errors::{DomainError, DomainResult};
use oc_core::repositories::RefreshTokenRepository;

/// MySQL-backed refresh token repository
///
/// Rows are keyed by the SHA-256 digest of the opaque token; the raw
/// value never reaches the database.
pub struct MySqlRefreshTokenRepository {
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a repository over the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row into a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> DomainResult<RefreshToken> {
        let id: String = row.try_get("id").map_err(DomainError::storage)?;
        let id = Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
            message: format!("Invalid token row id: {}", e),
        })?;

        Ok(RefreshToken {
            id,
            user_id: row.try_get("user_id").map_err(DomainError::storage)?,
            token_hash: row.try_get("token_hash").map_err(DomainError::storage)?,
            device: row.try_get("device").map_err(DomainError::storage)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(DomainError::storage)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(DomainError::storage)?,
            last_used_at: row
                .try_get::<DateTime<Utc>, _>("last_used_at")
                .map_err(DomainError::storage)?,
            revoked: row.try_get("revoked").map_err(DomainError::storage)?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(DomainError::storage)?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn save(&self, token: RefreshToken) -> DomainResult<RefreshToken> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, device, created_at, expires_at,
                last_used_at, revoked, revoked_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id)
            .bind(&token.token_hash)
            .bind(&token.device)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.last_used_at)
            .bind(token.revoked)
            .bind(token.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<RefreshToken>> {
        let query = r#"
            SELECT id, user_id, token_hash, device, created_at, expires_at,
                   last_used_at, revoked, revoked_at
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Vec<RefreshToken>> {
        let query = r#"
            SELECT id, user_id, token_hash, device, created_at, expires_at,
                   last_used_at, revoked, revoked_at
            FROM refresh_tokens
            WHERE user_id = ?
                AND revoked = FALSE
                AND expires_at > ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        let mut tokens = Vec::with_capacity(rows.len());
        for row in rows {
            tokens.push(Self::row_to_token(&row)?);
        }

        Ok(tokens)
    }

    async fn touch_last_used(
        &self,
        token_hash: &str,
        used_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let query = "UPDATE refresh_tokens SET last_used_at = ? WHERE token_hash = ?";

        let result = sqlx::query(query)
            .bind(used_at)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke(&self, token_hash: &str) -> DomainResult<bool> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE, revoked_at = ?
            WHERE token_hash = ? AND revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: i64) -> DomainResult<usize> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE, revoked_at = ?
            WHERE user_id = ? AND revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let query = "DELETE FROM refresh_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(result.rows_affected() as usize)
    }
}
