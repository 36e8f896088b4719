//! Credential verification and token issuance.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::storage::user::{NewUser, ROLE_OWNER, ROLE_VIEWER, User, UserStore};
use crate::token::jwt::{AccessTokenClaims, JwtService};
use crate::AuthResult;

/// A freshly minted access token with its metadata.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: OffsetDateTime,
    pub display_name: String,
    pub roles: Vec<String>,
}

/// Registers identities, verifies logins, and mints access tokens.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: Arc<JwtService>,
    token_ttl_secs: u64,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: Arc<JwtService>, config: &AuthConfig) -> Self {
        Self {
            users,
            jwt,
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    /// Registers a new identity and mints its first token.
    ///
    /// New identities receive the `Owner` role; the `Viewer` role is
    /// ensured alongside it as a reserved capability.
    ///
    /// # Errors
    ///
    /// Surfaces credential-store rejections (duplicate email, weak
    /// password) as `AuthError::Validation` with the failing field.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<IssuedToken> {
        if password.len() < 6 {
            return Err(AuthError::validation(
                "password",
                "password must be at least 6 characters",
            ));
        }

        let password_hash = password::hash_password(password)
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;

        let user = self
            .users
            .create_user(NewUser {
                email: email.to_string(),
                display_name: display_name.to_string(),
                password_hash,
            })
            .await?;

        self.users.ensure_role(ROLE_OWNER).await?;
        self.users.ensure_role(ROLE_VIEWER).await?;
        self.users.assign_role(user.id, ROLE_OWNER).await?;

        // Re-read so the token reflects the assigned roles.
        let user = self
            .users
            .find_by_email(&user.email)
            .await?
            .ok_or_else(|| AuthError::storage("registered user vanished"))?;

        tracing::info!(user = %user.id, "registered new identity");
        self.issue(&user)
    }

    /// Verifies credentials and mints a token.
    ///
    /// Unknown email and wrong password collapse into one `Unauthorized`
    /// outcome; a dummy hash verification keeps the unknown-account path
    /// from returning measurably faster.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<IssuedToken> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                password::verify_against_dummy(password);
                return Err(AuthError::unauthorized("invalid credentials"));
            }
        };

        let ok = password::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::internal(format!("stored hash unreadable: {e}")))?;
        if !ok {
            return Err(AuthError::unauthorized("invalid credentials"));
        }

        tracing::debug!(user = %user.id, "login succeeded");
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        let claims = AccessTokenClaims::new(
            user.id,
            user.email.clone(),
            user.display_name.clone(),
            user.roles.clone(),
            self.token_ttl_secs,
        );
        let access_token = self.jwt.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.expires_at(),
            display_name: user.display_name.clone(),
            roles: user.roles.clone(),
        })
    }
}
