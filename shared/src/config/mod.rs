//! Configuration types for the session and token services

mod auth;
mod cleanup;
mod database;

pub use auth::JwtConfig;
pub use cleanup::CleanupConfig;
pub use database::DatabaseConfig;
