//! # Infrastructure Layer
//!
//! Concrete implementations of the `oc_core` collaborator traits:
//! MySQL repositories over SQLx for the two token stores, the activity
//! log and the read-only user lookup, plus bcrypt password
//! verification.

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Security module - password hashing
pub mod security;

pub use database::{
    DatabasePool, MySqlActivityLogRepository, MySqlRefreshTokenRepository,
    MySqlRevokedTokenRepository, MySqlUserRepository,
};
pub use security::BcryptPasswordVerifier;
