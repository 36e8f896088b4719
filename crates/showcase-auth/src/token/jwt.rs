//! Access-token encoding and validation.
//!
//! Tokens are HS256-signed JWTs carrying a fixed, closed claim set: the
//! subject id, email, display name, assigned roles, and the issue/expiry
//! timestamps. Validity is entirely a function of signature and expiry;
//! nothing is stored server-side and nothing can be revoked early.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AuthError;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Subject (user id).
    pub sub: Uuid,

    /// Email address of the subject.
    pub email: String,

    /// Display name of the subject.
    pub name: String,

    /// Assigned role names.
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Builds claims for `user`, valid for `ttl_secs` from now.
    pub fn new(
        sub: Uuid,
        email: impl Into<String>,
        name: impl Into<String>,
        roles: Vec<String>,
        ttl_secs: u64,
    ) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub,
            email: email.into(),
            name: name.into(),
            roles,
            iat: now,
            exp: now + ttl_secs as i64,
        }
    }

    /// The expiry as an `OffsetDateTime`.
    pub fn expires_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.exp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

/// Service for encoding and validating access tokens.
///
/// Thread-safe; share behind an `Arc`.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    leeway_secs: u64,
}

impl JwtService {
    /// Creates a JWT service from a shared HMAC signing key.
    #[must_use]
    pub fn new(signing_key: &str, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            leeway_secs,
        }
    }

    /// Encodes claims into a signed token string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if encoding fails.
    pub fn encode(&self, claims: &AccessTokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("failed to encode token: {e}")))
    }

    /// Decodes and validates a token string.
    ///
    /// Checks the signature and expiry (with the configured leeway) and
    /// returns the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExpired` for expired tokens and
    /// `AuthError::InvalidToken` for anything else that fails to verify.
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;
        validation.validate_exp = true;
        validation.validate_aud = false;

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::invalid_token(e.to_string()),
            })
    }
}
