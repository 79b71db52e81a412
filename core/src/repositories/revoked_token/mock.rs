//! Mock implementation of RevokedTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedToken;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RevokedTokenRepository;

/// In-memory blacklist repository for tests
///
/// `fail_reads` simulates unreachable storage on the lookup path so
/// the fail-closed behavior of the revocation store can be exercised.
#[derive(Default)]
pub struct MockRevokedTokenRepository {
    entries: Arc<RwLock<HashMap<String, RevokedToken>>>,
    fail_reads: AtomicBool,
}

impl MockRevokedTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `contains` calls fail as if storage were down
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of blacklist rows currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the mock holds no rows
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevokedTokenRepository for MockRevokedTokenRepository {
    async fn insert(&self, entry: RevokedToken) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.entry(entry.token_hash.clone()).or_insert(entry);
        Ok(())
    }

    async fn contains(&self, token_hash: &str) -> DomainResult<bool> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::storage("simulated read failure"));
        }
        let entries = self.entries.read().await;
        Ok(entries.contains_key(token_hash))
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();

        entries.retain(|_, entry| entry.expires_at >= before);

        Ok(initial_count - entries.len())
    }
}
