//! Refresh token repository trait defining the persistence contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainResult;

/// Repository contract for refresh token persistence
///
/// Implementations are the source of truth for refresh tokens; the
/// in-memory index kept by the store above is derived and repopulated
/// lazily. Tokens are keyed by the SHA-256 digest of the opaque value.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Save a new refresh token row
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., storage unreachable)
    async fn save(&self, token: RefreshToken) -> DomainResult<RefreshToken>;

    /// Find a refresh token by its hashed value
    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<RefreshToken>>;

    /// Find all non-revoked, non-expired tokens for a user
    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Vec<RefreshToken>>;

    /// Update the last-used timestamp of a token
    ///
    /// Returns `false` if the token is unknown.
    async fn touch_last_used(
        &self,
        token_hash: &str,
        used_at: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// Revoke a specific refresh token
    ///
    /// Idempotent: returns `false` when the token is unknown or was
    /// already revoked, and never errors for either case.
    async fn revoke(&self, token_hash: &str) -> DomainResult<bool>;

    /// Revoke every non-revoked token of a user in one durable update
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens flipped to revoked
    async fn revoke_all_for_user(&self, user_id: i64) -> DomainResult<usize>;

    /// Delete rows whose expiry is strictly before the cutoff
    ///
    /// Called by the cleanup scheduler only; expired rows are already
    /// unusable, so this is compaction, not invalidation.
    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize>;
}
