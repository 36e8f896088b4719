//! Wire types for the Showcase HTTP API.
//!
//! Request bodies carry their own field-validation rules; handlers call
//! [`validator::Validate::validate`] before anything reaches the catalog
//! core, so the services below this boundary only ever see well-formed
//! writes.

use serde::{Deserialize, Serialize};
use showcase_core::{Project, ProjectDraft};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

// -------------------------
// Project projection
// -------------------------

/// Client-facing view of a stored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

impl From<&Project> for ProjectDto {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            summary: p.summary.clone(),
            tags: p.tags.clone(),
            repo_url: p.repo_url.clone(),
            live_url: p.live_url.clone(),
        }
    }
}

// -------------------------
// Project write requests
// -------------------------

/// Body of `POST /api/projects`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 120, message = "title must be 1-120 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "summary must be 1-2000 characters"))]
    pub summary: String,

    #[serde(default)]
    #[validate(custom(function = validate_tags))]
    pub tags: Vec<String>,

    #[validate(length(max = 300, message = "repo_url must be at most 300 characters"))]
    pub repo_url: Option<String>,

    #[validate(length(max = 300, message = "live_url must be at most 300 characters"))]
    pub live_url: Option<String>,
}

impl CreateProjectRequest {
    /// Converts the validated request into a draft for the catalog core.
    pub fn into_draft(self) -> ProjectDraft {
        ProjectDraft {
            title: self.title,
            summary: self.summary,
            tags: self.tags,
            repo_url: self.repo_url.filter(|s| !s.trim().is_empty()),
            live_url: self.live_url.filter(|s| !s.trim().is_empty()),
        }
    }
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if tag.trim().is_empty() {
            let mut err = ValidationError::new("tag_empty");
            err.message = Some("tags must not be blank".into());
            return Err(err);
        }
        if tag.len() > 40 {
            let mut err = ValidationError::new("tag_length");
            err.message = Some("each tag must be at most 40 characters".into());
            return Err(err);
        }
    }
    Ok(())
}

// -------------------------
// Auth requests/responses
// -------------------------

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "display_name must be 1-100 characters"))]
    pub display_name: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    pub display_name: String,
    pub roles: Vec<String>,
}

// -------------------------
// Validation error shaping
// -------------------------

/// One failing field, as reported in a 400 body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flattens `validator` output into per-field messages for a 400 body.
pub fn validation_details(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details = Vec::new();
    for (field, errs) in errors.field_errors() {
        for e in errs {
            details.push(FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            });
        }
    }
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
