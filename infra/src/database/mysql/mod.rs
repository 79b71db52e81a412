//! MySQL repository implementations

mod activity_log_repository_impl;
mod refresh_token_repository_impl;
mod revoked_token_repository_impl;
mod user_repository_impl;

pub use activity_log_repository_impl::MySqlActivityLogRepository;
pub use refresh_token_repository_impl::MySqlRefreshTokenRepository;
pub use revoked_token_repository_impl::MySqlRevokedTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
