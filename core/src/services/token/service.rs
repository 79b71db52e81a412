//! Main token service implementation

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, RefreshToken, RotatedAccess, SessionTokens};
use crate::domain::entities::user::AuthUser;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenRepository, RevokedTokenRepository, UserRepository};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::refresh_store::RefreshTokenStore;
use super::revocation_store::{RevocationCheck, RevocationStore};

/// Service for issuing, verifying and revoking session tokens
///
/// Owns the signed-token codec, the refresh token store and the
/// revocation store. The user directory is consulted on rotation to
/// re-check that the owning account is still active.
pub struct TokenService<R, V, U>
where
    R: RefreshTokenRepository,
    V: RevokedTokenRepository,
    U: UserRepository,
{
    refresh_store: Arc<RefreshTokenStore<R>>,
    revocation_store: Arc<RevocationStore<V>>,
    users: Arc<U>,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<R, V, U> TokenService<R, V, U>
where
    R: RefreshTokenRepository,
    V: RevokedTokenRepository,
    U: UserRepository,
{
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `refresh_repository` - Durable refresh token storage
    /// * `revoked_repository` - Durable blacklist storage
    /// * `users` - External user directory
    /// * `config` - Token service configuration
    pub fn new(
        refresh_repository: Arc<R>,
        revoked_repository: Arc<V>,
        users: Arc<U>,
        config: TokenServiceConfig,
    ) -> Self {
        let codec = TokenCodec::new(&config.jwt_secret);
        let refresh_store = Arc::new(RefreshTokenStore::new(
            refresh_repository,
            config.refresh_token_ttl_seconds,
        ));
        let revocation_store = Arc::new(RevocationStore::new(revoked_repository));

        Self {
            refresh_store,
            revocation_store,
            users,
            codec,
            config,
        }
    }

    /// The refresh token store, shared with the cleanup scheduler
    pub fn refresh_store(&self) -> Arc<RefreshTokenStore<R>> {
        Arc::clone(&self.refresh_store)
    }

    /// The revocation store, shared with the cleanup scheduler
    pub fn revocation_store(&self) -> Arc<RevocationStore<V>> {
        Arc::clone(&self.revocation_store)
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl(&self) -> i64 {
        self.config.access_token_ttl_seconds
    }

    /// Issues a new session (access + refresh token) for a user
    pub async fn issue_session(
        &self,
        user: &AuthUser,
        device: &str,
    ) -> DomainResult<SessionTokens> {
        let claims = Claims::new_access_token(user, self.config.access_token_ttl_seconds);
        let access_token = self.codec.issue(&claims)?;

        let (refresh_token, _) = self.refresh_store.create(user.id, device).await?;

        debug!(user_id = user.id, "issued session tokens");

        Ok(SessionTokens {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_ttl_seconds,
            refresh_expires_in: self.config.refresh_token_ttl_seconds,
        })
    }

    /// Exchanges a refresh token for a fresh access token
    ///
    /// The refresh token value itself is deliberately NOT replaced on
    /// use (sliding-window reuse): fewer durable writes per rotation,
    /// at the cost that legitimate use does not invalidate a stolen
    /// copy. The refresh TTL bounds that exposure.
    ///
    /// # Errors
    ///
    /// * `RefreshTokenInvalid` - unknown or revoked token
    /// * `RefreshTokenExpired` - past its expiry
    /// * `UserInactiveOrMissing` - owning account gone or deactivated
    pub async fn rotate(&self, refresh_token: &str) -> DomainResult<RotatedAccess> {
        let record = self
            .refresh_store
            .find(refresh_token)
            .await?
            .ok_or(TokenError::RefreshTokenInvalid)?;

        if record.revoked {
            return Err(TokenError::RefreshTokenInvalid.into());
        }
        if record.is_expired() {
            return Err(TokenError::RefreshTokenExpired.into());
        }

        // Re-resolve the owner: the account may have been deactivated
        // since the refresh token was issued.
        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .filter(AuthUser::can_authenticate)
            .ok_or(AuthError::UserInactiveOrMissing)?;

        let claims = Claims::new_access_token(&user, self.config.access_token_ttl_seconds);
        let access_token = self.codec.issue(&claims)?;

        self.refresh_store.touch_last_used(refresh_token).await;

        debug!(user_id = user.id, "rotated access token");

        Ok(RotatedAccess {
            access_token,
            expires_in: self.config.access_token_ttl_seconds,
            user_id: user.id,
        })
    }

    /// Invalidates tokens on logout
    ///
    /// An access token is blacklisted keyed by its own claimed expiry;
    /// its claims are read with the expiry check disabled so a token
    /// can be logged out after it has already expired. A refresh token
    /// is revoked in the refresh store.
    ///
    /// # Returns
    ///
    /// The affected user id, when one could be determined.
    pub async fn invalidate(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> DomainResult<Option<i64>> {
        let mut user_id = None;

        if let Some(access) = access_token {
            let claims = self.codec.decode_allow_expired(access)?;
            user_id = claims.user_id().ok();
            self.revocation_store
                .add(access, user_id, claims.expires_at())
                .await?;
        }

        if let Some(refresh) = refresh_token {
            if user_id.is_none() {
                if let Some(record) = self.refresh_store.find(refresh).await? {
                    user_id = Some(record.user_id);
                }
            }
            self.refresh_store.revoke(refresh).await?;
        }

        Ok(user_id)
    }

    /// Revokes every refresh token of a user in one pass
    ///
    /// Outstanding access tokens are NOT enumerated and blacklisted;
    /// without a registry of issued tokens that is infeasible. They
    /// stay valid until their own short expiry passes, so the access
    /// TTL is the knob that bounds this exposure window.
    pub async fn invalidate_all_sessions(&self, user_id: i64) -> DomainResult<usize> {
        let count = self.refresh_store.revoke_all_for_user(user_id).await?;
        info!(user_id, revoked = count, "revoked all sessions for user");
        Ok(count)
    }

    /// Verifies an access token and checks it against the blacklist
    ///
    /// This is the per-request entry point: signature and expiry via
    /// the codec, then the fail-closed revocation check.
    pub async fn verify_access(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.codec.verify(token)?;

        match self.revocation_store.check(token).await {
            RevocationCheck::Clear => Ok(claims),
            RevocationCheck::Revoked => Err(TokenError::Revoked.into()),
            RevocationCheck::Unknown => {
                warn!("revocation state unknown, denying access token");
                Err(TokenError::Revoked.into())
            }
        }
    }

    /// Whether an access token has been revoked
    ///
    /// `Unknown` maps to `true`: when storage cannot confirm, the
    /// token is treated as revoked.
    pub async fn is_revoked(&self, token: &str) -> bool {
        !matches!(
            self.revocation_store.check(token).await,
            RevocationCheck::Clear
        )
    }

    /// Lists a user's live sessions
    pub async fn active_sessions(&self, user_id: i64) -> DomainResult<Vec<RefreshToken>> {
        self.refresh_store.sessions_for_user(user_id).await
    }
}
