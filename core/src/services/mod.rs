//! Business services for session and token lifecycle

pub mod auth;
pub mod events;
pub mod token;

pub use auth::{AuthService, PasswordVerifier};
pub use events::{ActivityLogSubscriber, AuthEventBus, AuthEventSubscriber};
pub use token::{
    hash_token, CleanupHandle, CleanupOutcome, CleanupScheduler, RefreshTokenStore,
    RevocationCheck, RevocationStore, TokenCodec, TokenService, TokenServiceConfig,
};
