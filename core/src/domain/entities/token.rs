//! Token entities for JWT-based session management.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "opsconsole";

/// JWT audience
pub const JWT_AUDIENCE: &str = "opsconsole-admin";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (numeric user id, stringified)
    pub sub: String,

    /// Username at issue time
    pub username: String,

    /// Email at issue time
    pub email: String,

    /// Role at issue time
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user` - The user the token is issued for
    /// * `ttl_seconds` - Access token lifetime in seconds
    ///
    /// # Returns
    ///
    /// A new `Claims` instance for an access token
    pub fn new_access_token(user: &super::user::AuthUser, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the numeric user id from the claims
    ///
    /// # Returns
    ///
    /// `Ok(i64)` if the subject parses as a numeric id, `Err` otherwise
    pub fn user_id(&self) -> Result<i64, std::num::ParseIntError> {
        self.sub.parse()
    }

    /// Gets the expiry as a UTC timestamp
    ///
    /// Falls back to the Unix epoch on an out-of-range claim, which a
    /// verified token can never carry.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// Refresh token entity stored in the database
///
/// The raw opaque token string is never stored; `token_hash` holds its
/// SHA-256 digest and is the lookup key everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token row
    pub id: Uuid,

    /// User id this token belongs to
    pub user_id: i64,

    /// Hashed token value
    pub token_hash: String,

    /// Free-form descriptor of the device that holds this token
    pub device: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the token was last exchanged for an access token
    pub last_used_at: DateTime<Utc>,

    /// Whether the token has been revoked (terminal once set)
    pub revoked: bool,

    /// Timestamp of revocation, if revoked
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user's id
    /// * `token_hash` - The hashed opaque token value
    /// * `device` - Device descriptor supplied at login
    /// * `ttl_seconds` - Refresh token lifetime in seconds
    pub fn new(user_id: i64, token_hash: String, device: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            device,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
            last_used_at: now,
            revoked: false,
            revoked_at: None,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the refresh token is usable
    ///
    /// A token is usable if it has not expired and has not been revoked.
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.revoked
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.revoked = true;
        self.revoked_at = Some(Utc::now());
    }

    /// Updates the last-used timestamp
    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }
}

/// Blacklist entry for an access token revoked before its natural expiry
///
/// The entry only needs to outlive the token's own `exp` claim; after
/// that the codec rejects the token as expired and the row can be
/// reclaimed by cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    /// Unique identifier for the blacklist row
    pub id: Uuid,

    /// Hashed access token value
    pub token_hash: String,

    /// Owning user id, when the claims could be read
    pub user_id: Option<i64>,

    /// Expiry copied from the token's own claim
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the token was revoked
    pub revoked_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Creates a new blacklist entry
    pub fn new(token_hash: String, user_id: Option<i64>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            token_hash,
            user_id,
            expires_at,
            revoked_at: Utc::now(),
        }
    }

    /// Checks if the entry has outlived the token it blacklists
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds, for client-side refresh scheduling
    pub expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

/// Fresh access token returned from a refresh-token exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatedAccess {
    /// JWT access token
    pub access_token: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,

    /// Owner of the refresh token that was exchanged
    #[serde(skip)]
    pub user_id: i64,
}
