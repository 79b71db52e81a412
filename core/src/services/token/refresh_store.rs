//! Refresh token store: a read-through cache over durable storage.
//!
//! The repository is the source of truth. The in-memory index is
//! derived state, updated only after a durable write succeeds, and
//! repopulated lazily on lookup misses after a restart. Locks are
//! taken only around map mutation, never across a repository call.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainResult;
use crate::repositories::RefreshTokenRepository;

use super::hash_token;

/// Bytes of entropy in an opaque refresh token (256-bit)
const OPAQUE_TOKEN_BYTES: usize = 32;

/// In-memory index over refresh tokens
///
/// Primary key: token hash. Secondary: user id, for bulk invalidation
/// and session listing.
#[derive(Default)]
struct RefreshIndex {
    by_hash: HashMap<String, RefreshToken>,
    by_user: HashMap<i64, HashSet<String>>,
}

impl RefreshIndex {
    fn insert(&mut self, token: RefreshToken) {
        self.by_user
            .entry(token.user_id)
            .or_default()
            .insert(token.token_hash.clone());
        self.by_hash.insert(token.token_hash.clone(), token);
    }

    fn remove(&mut self, token_hash: &str) {
        if let Some(token) = self.by_hash.remove(token_hash) {
            if let Some(hashes) = self.by_user.get_mut(&token.user_id) {
                hashes.remove(token_hash);
                if hashes.is_empty() {
                    self.by_user.remove(&token.user_id);
                }
            }
        }
    }

    fn evict_user(&mut self, user_id: i64) {
        if let Some(hashes) = self.by_user.remove(&user_id) {
            for hash in hashes {
                self.by_hash.remove(&hash);
            }
        }
    }
}

/// Durable-backed refresh token store with an in-memory index
pub struct RefreshTokenStore<R: RefreshTokenRepository> {
    repository: Arc<R>,
    ttl_seconds: i64,
    index: RwLock<RefreshIndex>,
}

impl<R: RefreshTokenRepository> RefreshTokenStore<R> {
    /// Creates a store over the given repository
    ///
    /// # Arguments
    ///
    /// * `repository` - Durable refresh token storage
    /// * `ttl_seconds` - Lifetime assigned to newly created tokens
    pub fn new(repository: Arc<R>, ttl_seconds: i64) -> Self {
        Self {
            repository,
            ttl_seconds,
            index: RwLock::new(RefreshIndex::default()),
        }
    }

    /// Creates and persists a refresh token for a user
    ///
    /// The opaque string is returned exactly once; only its hash is
    /// kept. The durable write happens before the index update, so a
    /// crash in between costs at most one lazy cache miss.
    pub async fn create(
        &self,
        user_id: i64,
        device: &str,
    ) -> DomainResult<(String, RefreshToken)> {
        let opaque = generate_opaque_token();
        let token = RefreshToken::new(
            user_id,
            hash_token(&opaque),
            device.to_string(),
            self.ttl_seconds,
        );

        let saved = self.repository.save(token).await?;

        let mut index = self.index.write().await;
        index.insert(saved.clone());

        Ok((opaque, saved))
    }

    /// Looks up a refresh token by its opaque string
    ///
    /// Read-through: index hit first, repository on a miss, and the
    /// index is populated from what the repository returns. The record
    /// is returned regardless of its revoked/expired state; callers
    /// check `is_active` themselves.
    pub async fn find(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        let token_hash = hash_token(token);

        {
            let index = self.index.read().await;
            if let Some(token) = index.by_hash.get(&token_hash) {
                return Ok(Some(token.clone()));
            }
        }

        match self.repository.find_by_hash(&token_hash).await? {
            Some(token) => {
                let mut index = self.index.write().await;
                index.insert(token.clone());
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }

    /// Updates the last-used timestamp of a token
    ///
    /// Best-effort: a stale timestamp is not a correctness hazard, so
    /// failures are logged and swallowed rather than aborting the
    /// caller's request.
    pub async fn touch_last_used(&self, token: &str) {
        let token_hash = hash_token(token);
        let used_at = Utc::now();

        match self.repository.touch_last_used(&token_hash, used_at).await {
            Ok(_) => {
                let mut index = self.index.write().await;
                if let Some(token) = index.by_hash.get_mut(&token_hash) {
                    token.last_used_at = used_at;
                }
            }
            Err(e) => {
                warn!("failed to update refresh token last-used timestamp: {}", e);
            }
        }
    }

    /// Revokes a refresh token
    ///
    /// Idempotent: returns `false` when the token is unknown or was
    /// already revoked. Revocation is terminal.
    pub async fn revoke(&self, token: &str) -> DomainResult<bool> {
        let token_hash = hash_token(token);

        let revoked = self.repository.revoke(&token_hash).await?;

        if revoked {
            let mut index = self.index.write().await;
            if let Some(token) = index.by_hash.get_mut(&token_hash) {
                token.revoke();
            }
        }

        Ok(revoked)
    }

    /// Revokes every live refresh token of a user
    ///
    /// One durable bulk update, then eviction of the user's cached
    /// entries. A token whose durable write committed before the bulk
    /// statement is caught by it; one committing after is a new
    /// session and unaffected.
    pub async fn revoke_all_for_user(&self, user_id: i64) -> DomainResult<usize> {
        let count = self.repository.revoke_all_for_user(user_id).await?;

        let mut index = self.index.write().await;
        index.evict_user(user_id);

        Ok(count)
    }

    /// Lists live sessions for a user, straight from durable storage
    pub async fn sessions_for_user(&self, user_id: i64) -> DomainResult<Vec<RefreshToken>> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Deletes rows expired before the cutoff from durable storage
    ///
    /// Also sweeps matching index entries. The sweep bounds memory
    /// only; lookups already treat expired entries as unusable.
    pub async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize> {
        let count = self.repository.delete_expired(before).await?;

        let mut index = self.index.write().await;
        let expired: Vec<String> = index
            .by_hash
            .values()
            .filter(|t| t.expires_at < before)
            .map(|t| t.token_hash.clone())
            .collect();
        for hash in expired {
            index.remove(&hash);
        }

        Ok(count)
    }

    /// Number of entries currently in the in-memory index
    pub async fn cached_len(&self) -> usize {
        self.index.read().await.by_hash.len()
    }
}

/// Generates a random opaque token string (256 bits, base64url)
fn generate_opaque_token() -> String {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
