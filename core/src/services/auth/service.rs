//! Main authentication service implementation

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::event::AuthEvent;
use crate::domain::entities::token::{Claims, RefreshToken, RotatedAccess, SessionTokens};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{
    RefreshTokenRepository, RevokedTokenRepository, UserRepository,
};
use crate::services::events::AuthEventBus;
use crate::services::token::TokenService;

use super::password::PasswordVerifier;

/// Facade composing the token service, user directory, password
/// verification and the event bus
pub struct AuthService<R, V, U, P>
where
    R: RefreshTokenRepository,
    V: RevokedTokenRepository,
    U: UserRepository,
    P: PasswordVerifier,
{
    /// Token service for session issuance and revocation
    token_service: Arc<TokenService<R, V, U>>,
    /// External user directory
    users: Arc<U>,
    /// Slow-hash password verification collaborator
    password_verifier: Arc<P>,
    /// Event bus for lifecycle side effects
    event_bus: Arc<AuthEventBus>,
}

impl<R, V, U, P> AuthService<R, V, U, P>
where
    R: RefreshTokenRepository,
    V: RevokedTokenRepository,
    U: UserRepository,
    P: PasswordVerifier,
{
    /// Creates a new authentication service
    pub fn new(
        token_service: Arc<TokenService<R, V, U>>,
        users: Arc<U>,
        password_verifier: Arc<P>,
        event_bus: Arc<AuthEventBus>,
    ) -> Self {
        Self {
            token_service,
            users,
            password_verifier,
            event_bus,
        }
    }

    /// The event bus this service publishes on
    pub fn event_bus(&self) -> Arc<AuthEventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Authenticates a user and issues a session
    ///
    /// Unknown account, deactivated account and wrong password all
    /// come back as `InvalidCredentials`; responses must not reveal
    /// which accounts exist.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device: &str,
    ) -> DomainResult<SessionTokens> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| u.can_authenticate())
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_verifier
            .verify(password, &user.password_hash)?
        {
            warn!(user_id = user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_service.issue_session(&user, device).await?;

        info!(user_id = user.id, "user logged in");
        self.event_bus.publish(AuthEvent::login(user.id, device)).await;

        Ok(tokens)
    }

    /// Exchanges a refresh token for a fresh access token
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<RotatedAccess> {
        let rotated = self.token_service.rotate(refresh_token).await?;

        self.event_bus
            .publish(AuthEvent::token_rotated(rotated.user_id))
            .await;

        Ok(rotated)
    }

    /// Logs a single session out
    ///
    /// The access token (when given) is blacklisted for the remainder
    /// of its own lifetime; the refresh token (when given) is revoked.
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> DomainResult<()> {
        let user_id = self
            .token_service
            .invalidate(access_token, refresh_token)
            .await?;

        info!(?user_id, "session logged out");
        self.event_bus.publish(AuthEvent::logout(user_id)).await;

        Ok(())
    }

    /// Logs a user out of every device
    ///
    /// # Returns
    ///
    /// The number of refresh tokens revoked.
    pub async fn logout_all(&self, user_id: i64) -> DomainResult<usize> {
        let count = self.token_service.invalidate_all_sessions(user_id).await?;

        self.event_bus
            .publish(AuthEvent::logout_all(user_id, count))
            .await;

        Ok(count)
    }

    /// Revokes every session after a password change
    ///
    /// The password update itself belongs to the surrounding admin
    /// panel; this is only the session fallout.
    pub async fn password_changed(&self, user_id: i64) -> DomainResult<usize> {
        let count = self.token_service.invalidate_all_sessions(user_id).await?;

        self.event_bus
            .publish(AuthEvent::password_changed(user_id, count))
            .await;

        Ok(count)
    }

    /// Verifies an access token for a request guard
    pub async fn verify_access(&self, token: &str) -> DomainResult<Claims> {
        self.token_service.verify_access(token).await
    }

    /// Lists a user's live sessions for the device overview
    pub async fn active_sessions(&self, user_id: i64) -> DomainResult<Vec<RefreshToken>> {
        self.token_service.active_sessions(user_id).await
    }
}
