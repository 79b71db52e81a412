//! Error type definitions for token and authentication operations.
//!
//! Display messages are terse; presentation concerns belong to the
//! HTTP layer above this crate.

use thiserror::Error;

/// Token-related errors
///
/// `Malformed`, `BadSignature` and `Expired` are local and terminal;
/// callers must never retry them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Invalid refresh token")]
    RefreshTokenInvalid,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token generation failed")]
    IssueFailed,
}

/// Authentication errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Login rejected. Deliberately covers unknown account, inactive
    /// account and wrong password alike, so responses cannot be used
    /// to probe which accounts exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account behind a refresh token is gone or deactivated
    #[error("User inactive or missing")]
    UserInactiveOrMissing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_token_error_display() {
        assert_eq!(TokenError::Malformed.to_string(), "Malformed token");
        assert_eq!(TokenError::Expired.to_string(), "Token expired");
        assert_eq!(
            TokenError::RefreshTokenExpired.to_string(),
            "Refresh token expired"
        );
    }

    #[test]
    fn test_token_error_bridges_to_domain_error() {
        let err: DomainError = TokenError::Revoked.into();
        assert!(matches!(err, DomainError::Token(TokenError::Revoked)));
        assert_eq!(err.to_string(), "Token revoked");
    }

    #[test]
    fn test_storage_error_message() {
        let err = DomainError::storage("connection refused");
        assert_eq!(err.to_string(), "Storage unavailable: connection refused");
    }
}
