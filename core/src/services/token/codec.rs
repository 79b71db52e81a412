//! Stateless signed-token codec.
//!
//! Encoding and verification are pure; no store is consulted here.
//! Whether a structurally valid token has been revoked is the
//! revocation store's question.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::TokenError;

/// HS256 codec over a shared signing secret
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same validation with the expiry check disabled; logout must be
    /// able to read claims out of a token that already expired.
    validation_allow_expired: Validation,
}

impl TokenCodec {
    /// Creates a codec from the signing secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        // Access-token TTLs are minutes to hours; no skew tolerance.
        validation.leeway = 0;

        let mut validation_allow_expired = validation.clone();
        validation_allow_expired.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            validation_allow_expired,
        }
    }

    /// Encodes and signs claims into a compact token string
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| TokenError::IssueFailed)
    }

    /// Verifies a token and returns its claims
    ///
    /// # Errors
    ///
    /// * `Malformed` - the compact structure cannot be decoded
    /// * `BadSignature` - the signature does not match
    /// * `Expired` - `now >= exp`
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }

    /// Verifies the signature but not the expiry, returning the claims
    ///
    /// Used when blacklisting on logout: a token presented for logout
    /// may already be past its `exp`, and its claims are still needed
    /// to key the blacklist entry.
    pub fn decode_allow_expired(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation_allow_expired)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ => TokenError::Malformed,
    }
}
