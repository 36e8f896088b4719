//! Bearer token extractors.
//!
//! [`BearerAuth`] resolves the `Authorization` header into a validated
//! [`AuthContext`] or rejects with 401. [`OwnerAuth`] additionally
//! requires the `Owner` role (403 otherwise), so mutation handlers can
//! take an already-authorized caller context instead of re-checking
//! roles themselves.
//!
//! # Example
//!
//! ```ignore
//! async fn delete_project(OwnerAuth(auth): OwnerAuth) -> StatusCode {
//!     tracing::info!(caller = %auth.subject, "delete requested");
//!     StatusCode::NO_CONTENT
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::storage::user::ROLE_OWNER;
use crate::token::jwt::JwtService;

use super::types::AuthContext;

/// State required for bearer token validation.
///
/// Include in the application state and expose via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<JwtService>,
}

impl AuthState {
    pub fn new(jwt: Arc<JwtService>) -> Self {
        Self { jwt }
    }
}

/// Extractor that validates a bearer token and yields the caller context.
pub struct BearerAuth(pub AuthContext);

impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::unauthorized("missing Authorization header"))?;

        let claims = auth_state.jwt.decode(token).map_err(|e| {
            tracing::debug!(error = %e, "token validation failed");
            e
        })?;

        Ok(BearerAuth(AuthContext::from(claims)))
    }
}

/// Extractor that additionally requires the `Owner` role.
pub struct OwnerAuth(pub AuthContext);

impl<S> FromRequestParts<S> for OwnerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let BearerAuth(context) = BearerAuth::from_request_parts(parts, state).await?;

        if !context.has_role(ROLE_OWNER) {
            tracing::debug!(caller = %context.subject, "caller lacks Owner role");
            return Err(AuthError::forbidden("Owner role required"));
        }

        Ok(OwnerAuth(context))
    }
}
