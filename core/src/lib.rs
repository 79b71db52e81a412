//! # OpsConsole Core
//!
//! Session and token lifecycle core for the OpsConsole backend.
//! This crate contains domain entities, token and session services,
//! repository interfaces, and error types. Durable storage, password
//! hashing and the HTTP layer live behind the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
