//! Revoked access token repository interface and mock implementation

mod mock;
mod r#trait;

pub use mock::MockRevokedTokenRepository;
pub use r#trait::RevokedTokenRepository;
