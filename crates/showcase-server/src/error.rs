//! HTTP-facing error type.
//!
//! Collapses the layer errors into the response taxonomy: 404 for absent
//! records, 401/403 for credential and role failures, 400 with per-field
//! details for rejected payloads, 500 for store or internal failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use showcase_api::{FieldError, validation_details};
use showcase_auth::AuthError;
use showcase_storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    /// Requested record/identifier absent. Never retried.
    NotFound,

    /// Missing or invalid credentials.
    Unauthorized,

    /// Authenticated but lacking the required role.
    Forbidden(String),

    /// Malformed write payload or credential-store rejection.
    Validation(Vec<FieldError>),

    /// The store (or another internal collaborator) failed; already
    /// logged where it happened.
    Internal(String),
}

impl ApiError {
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self::Validation(details)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden(msg) => write!(f, "forbidden: {msg}"),
            Self::Validation(details) => write!(f, "validation failed ({} fields)", details.len()),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "store operation failed");
        Self::Internal(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized { .. }
            | AuthError::InvalidToken { .. }
            | AuthError::TokenExpired => Self::Unauthorized,
            AuthError::Forbidden { message } => Self::Forbidden(message),
            AuthError::Validation { field, message } => {
                Self::Validation(vec![FieldError { field, message }])
            }
            AuthError::Storage { ref message } | AuthError::Internal { ref message } => {
                tracing::error!(error = %message, "auth operation failed");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(validation_details(&err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "not-found" }),
            ),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "unauthorized", "message": "invalid or missing credentials" }),
            ),
            Self::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                json!({ "error": "forbidden", "message": message }),
            ),
            Self::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation", "details": details }),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "internal", "message": "the request could not be completed" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from(AuthError::TokenExpired),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(AuthError::forbidden("Owner role required")),
            ApiError::Forbidden(_)
        ));
        match ApiError::from(AuthError::validation("email", "taken")) {
            ApiError::Validation(details) => assert_eq!(details[0].field, "email"),
            other => panic!("expected validation, got {other}"),
        }
    }

    #[test]
    fn store_errors_are_internal() {
        let err = ApiError::from(StorageError::unavailable("connection refused"));
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
