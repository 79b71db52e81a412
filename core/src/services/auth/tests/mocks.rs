//! Shared mocks for authentication facade tests

use crate::errors::{DomainError, DomainResult};
use crate::services::auth::PasswordVerifier;

/// Password verifier that treats the stored hash as `plain:<password>`
///
/// Stands in for the slow bcrypt collaborator; facade tests only care
/// about match/mismatch, not hashing strength.
pub struct PlainPasswordVerifier;

impl PasswordVerifier for PlainPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool> {
        Ok(password_hash == format!("plain:{}", password))
    }
}

/// Builds the stored-hash form `PlainPasswordVerifier` accepts
pub fn plain_hash(password: &str) -> String {
    format!("plain:{}", password)
}

/// Password verifier whose backend is broken
pub struct FailingPasswordVerifier;

impl PasswordVerifier for FailingPasswordVerifier {
    fn verify(&self, _password: &str, _password_hash: &str) -> DomainResult<bool> {
        Err(DomainError::Internal {
            message: "hash backend unavailable".to_string(),
        })
    }
}
