//! MySQL implementation of the ActivityLogRepository trait.

use async_trait::async_trait;

use oc_core::domain::entities::activity::ActivityLogEntry;
use oc_core::errors::{DomainError, DomainResult};
use oc_core::repositories::ActivityLogRepository;
use sqlx::MySqlPool;

/// MySQL-backed append-only activity log
pub struct MySqlActivityLogRepository {
    pool: MySqlPool,
}

impl MySqlActivityLogRepository {
    /// Create a repository over the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for MySqlActivityLogRepository {
    async fn record(&self, entry: ActivityLogEntry) -> DomainResult<()> {
        let query = r#"
            INSERT INTO activity_log (id, user_id, action, detail, occurred_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(entry.id.to_string())
            .bind(entry.user_id)
            .bind(&entry.action)
            .bind(entry.detail.to_string())
            .bind(entry.occurred_at)
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(())
    }
}
