//! Revocation store for access tokens invalidated before expiry.
//!
//! The in-memory set answers the hot path (every authenticated
//! request); the repository answers cold-cache misses after a restart.
//! A storage failure on the lookup path is surfaced as `Unknown`,
//! which every caller treats as revoked. A false negative here would
//! re-authorize a token the user believes is dead, so this path never
//! guesses.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainResult;
use crate::repositories::RevokedTokenRepository;

use super::hash_token;

/// Outcome of a revocation lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationCheck {
    /// The token is on the blacklist
    Revoked,
    /// The token is not on the blacklist
    Clear,
    /// Storage was unreachable and the cache had no entry; callers
    /// must deny
    Unknown,
}

/// Durable-backed blacklist with an in-memory fast path
pub struct RevocationStore<V: RevokedTokenRepository> {
    repository: Arc<V>,
    /// token hash -> expiry copied from the token's own claim
    cache: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl<V: RevokedTokenRepository> RevocationStore<V> {
    /// Creates a store over the given repository
    pub fn new(repository: Arc<V>) -> Self {
        Self {
            repository,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Blacklists a token until the expiry copied from its own claim
    ///
    /// Idempotent; the durable insert happens before the cache update.
    pub async fn add(
        &self,
        token: &str,
        user_id: Option<i64>,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let token_hash = hash_token(token);
        let entry = RevokedToken::new(token_hash.clone(), user_id, expires_at);

        self.repository.insert(entry).await?;

        let mut cache = self.cache.write().await;
        cache.insert(token_hash, expires_at);

        Ok(())
    }

    /// Checks whether a token has been revoked
    ///
    /// Cache hit answers without I/O. On a miss the repository is
    /// consulted; an error there yields `Unknown`, never `Clear`.
    pub async fn check(&self, token: &str) -> RevocationCheck {
        let token_hash = hash_token(token);

        {
            let cache = self.cache.read().await;
            if cache.contains_key(&token_hash) {
                return RevocationCheck::Revoked;
            }
        }

        match self.repository.contains(&token_hash).await {
            Ok(true) => {
                // Expiry unknown for a cold hit; the entry lives until
                // restart or the token itself stops being presented.
                let mut cache = self.cache.write().await;
                cache.insert(token_hash, DateTime::<Utc>::MAX_UTC);
                RevocationCheck::Revoked
            }
            Ok(false) => RevocationCheck::Clear,
            Err(e) => {
                warn!("revocation lookup failed, treating token as revoked: {}", e);
                RevocationCheck::Unknown
            }
        }
    }

    /// Deletes entries whose copied expiry passed before the cutoff
    pub async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let count = self.repository.delete_expired(before).await?;

        let mut cache = self.cache.write().await;
        cache.retain(|_, expires_at| *expires_at >= before);

        Ok(count)
    }

    /// Number of entries currently in the in-memory set
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }
}
