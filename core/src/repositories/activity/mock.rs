//! Mock implementation of ActivityLogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::activity::ActivityLogEntry;
use crate::errors::DomainResult;

use super::r#trait::ActivityLogRepository;

/// In-memory activity log for tests
#[derive(Default)]
pub struct MockActivityLogRepository {
    entries: Arc<RwLock<Vec<ActivityLogEntry>>>,
}

impl MockActivityLogRepository {
    /// Create a new mock log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, in insertion order
    pub async fn entries(&self) -> Vec<ActivityLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl ActivityLogRepository for MockActivityLogRepository {
    async fn record(&self, entry: ActivityLogEntry) -> DomainResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
