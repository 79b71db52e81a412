//! Shared configuration types for the OpsConsole backend
//!
//! This crate holds the configuration surface consumed by the session
//! and token services. Everything is provided at construction time;
//! no service reads the environment on its own.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{CleanupConfig, DatabaseConfig, JwtConfig};
