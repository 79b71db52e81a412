//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Durable storage could not be reached or failed mid-operation.
    /// On write paths this is surfaced to the caller; the revocation
    /// check read path instead degrades to deny (see the revocation
    /// store).
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Creates a storage error from any displayable cause
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            message: cause.to_string(),
        }
    }
}
