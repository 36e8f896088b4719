//! Registration and login endpoints.

use axum::{Json, extract::State};
use showcase_api::{AuthResponse, LoginRequest, RegisterRequest};
use validator::Validate;

use crate::error::ApiError;
use crate::server::AppState;

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    body.validate()?;

    let issued = state
        .auth
        .register(&body.email, &body.password, &body.display_name)
        .await?;

    Ok(Json(AuthResponse {
        access_token: issued.access_token,
        expires_at: issued.expires_at,
        display_name: issued.display_name,
        roles: issued.roles,
    }))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    body.validate()
        .map_err(|_| ApiError::Unauthorized)?;

    let issued = state.auth.login(&body.email, &body.password).await?;

    Ok(Json(AuthResponse {
        access_token: issued.access_token,
        expires_at: issued.expires_at,
        display_name: issued.display_name,
        roles: issued.roles,
    }))
}
