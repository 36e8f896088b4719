//! Authentication and authorization error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors that can occur during authentication and authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request lacks valid authentication credentials.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// The authenticated caller lacks the required role.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of why access is forbidden.
        message: String,
    },

    /// The access token is invalid, malformed, or cannot be parsed.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The access token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The credential store rejected the submitted identity.
    #[error("Validation failed on {field}: {message}")]
    Validation {
        /// The failing field.
        field: String,
        /// Why the field was rejected.
        message: String,
    },

    /// An error occurred while storing or retrieving auth data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Unauthorized { .. } | Self::InvalidToken { .. } | Self::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
            Self::Storage { .. } | Self::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };

        let body = match &self {
            Self::Validation { field, message } => json!({
                "error": code,
                "details": [{ "field": field, "message": message }],
            }),
            // Credential failures and token problems share one body so
            // callers cannot distinguish which check failed.
            Self::Unauthorized { .. } | Self::InvalidToken { .. } | Self::TokenExpired => json!({
                "error": code,
                "message": "invalid or missing credentials",
            }),
            other => json!({
                "error": code,
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
