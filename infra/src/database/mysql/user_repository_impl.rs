//! MySQL implementation of the UserRepository trait.
//!
//! Read-only: user CRUD belongs to the surrounding admin panel. This
//! lookup exists so the session core can resolve accounts on login
//! and re-check them on token rotation.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use oc_core::domain::entities::user::AuthUser;
use oc_core::errors::{DomainError, DomainResult};
use oc_core::repositories::UserRepository;

/// Read-only MySQL user directory
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a repository over the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<AuthUser> {
        Ok(AuthUser {
            id: row.try_get("id").map_err(DomainError::storage)?,
            username: row.try_get("username").map_err(DomainError::storage)?,
            email: row.try_get("email").map_err(DomainError::storage)?,
            role: row.try_get("role").map_err(DomainError::storage)?,
            password_hash: row.try_get("password_hash").map_err(DomainError::storage)?,
            is_active: row.try_get("is_active").map_err(DomainError::storage)?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AuthUser>> {
        let query = r#"
            SELECT id, username, email, role, password_hash, is_active
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<AuthUser>> {
        let query = r#"
            SELECT id, username, email, role, password_hash, is_active
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}
