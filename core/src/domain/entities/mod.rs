//! Domain entities for the session and token core

pub mod activity;
pub mod event;
pub mod token;
pub mod user;

pub use activity::ActivityLogEntry;
pub use event::{AuthEvent, AuthEventKind};
pub use token::{Claims, RefreshToken, RevokedToken, RotatedAccess, SessionTokens};
pub use user::AuthUser;
