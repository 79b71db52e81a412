//! Revoked access token repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainResult;

/// Repository contract for the access-token blacklist
///
/// Rows exist only until the expiry copied from the token's own claim
/// passes; after that the codec rejects the token anyway and cleanup
/// reclaims the row.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    /// Insert a blacklist entry
    ///
    /// Idempotent: inserting the same token hash twice is harmless.
    async fn insert(&self, entry: RevokedToken) -> DomainResult<()>;

    /// Check whether a token hash is blacklisted
    ///
    /// An `Err` here means storage is unreachable; callers must treat
    /// that as unknown, never as "not revoked".
    async fn contains(&self, token_hash: &str) -> DomainResult<bool>;

    /// Delete rows whose copied expiry is strictly before the cutoff
    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<usize>;
}
