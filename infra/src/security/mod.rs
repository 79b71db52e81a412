//! Security module - password hashing implementations

mod password;

pub use password::BcryptPasswordVerifier;
