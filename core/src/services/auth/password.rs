//! Password verification collaborator trait.

use crate::errors::DomainResult;

/// Slow one-way password hash verification
///
/// Hashing cost and algorithm live with the implementation (see the
/// bcrypt implementation in `oc_infra`); the core only asks whether a
/// candidate password matches a stored hash.
pub trait PasswordVerifier: Send + Sync {
    /// Checks a candidate password against a stored hash
    fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool>;
}
