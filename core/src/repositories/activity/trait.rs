//! Activity log repository trait.

use async_trait::async_trait;

use crate::domain::entities::activity::ActivityLogEntry;
use crate::errors::DomainResult;

/// Append-only store for activity log entries
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Record one activity log entry
    async fn record(&self, entry: ActivityLogEntry) -> DomainResult<()>;
}
