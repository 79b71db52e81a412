//! Bcrypt implementation of the PasswordVerifier trait.

use oc_core::errors::{DomainError, DomainResult};
use oc_core::services::auth::PasswordVerifier;

/// Bcrypt password verification with configurable hashing cost
///
/// The cost only matters when hashing new passwords (done by the
/// admin-panel user CRUD through [`Self::hash`]); verification reads
/// the cost out of the stored hash.
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl BcryptPasswordVerifier {
    /// Create a verifier with the given hashing cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password at the configured cost
    pub fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        // Minimum cost keeps the test fast
        let verifier = BcryptPasswordVerifier::new(4);
        let hash = verifier.hash("hunter2").unwrap();

        assert!(verifier.verify("hunter2", &hash).unwrap());
        assert!(!verifier.verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let verifier = BcryptPasswordVerifier::default();
        assert!(verifier.verify("hunter2", "not-a-bcrypt-hash").is_err());
    }
}
