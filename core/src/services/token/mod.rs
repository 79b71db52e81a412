//! Token service module
//!
//! This module handles all token-related operations:
//! - JWT access token issuance and verification
//! - Refresh token storage with a read-through in-memory index
//! - Access token revocation (blacklist) with fail-closed lookups
//! - Background cleanup of expired rows

mod cleanup;
mod codec;
mod config;
mod refresh_store;
mod revocation_store;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupHandle, CleanupOutcome, CleanupScheduler, CleanupTrigger};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use refresh_store::RefreshTokenStore;
pub use revocation_store::{RevocationCheck, RevocationStore};
pub use service::TokenService;

use sha2::{Digest, Sha256};

/// Hashes a token for use as a storage and cache key
///
/// Raw bearer strings never reach durable storage or the in-memory
/// indexes; every lookup goes through this digest.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
