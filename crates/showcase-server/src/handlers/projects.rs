//! Catalog endpoints.
//!
//! Reads are open to any caller; mutations require an `Owner` caller
//! context, resolved by the [`OwnerAuth`] extractor before the handler
//! body runs.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use showcase_api::{CreateProjectRequest, ProjectDto};
use showcase_auth::OwnerAuth;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::DEFAULT_PAGE_SIZE;
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

/// `GET /api/projects?q=&skip=&take=`
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProjectDto>>, ApiError> {
    let page = state
        .listing
        .list(
            params.q.as_deref(),
            params.skip.unwrap_or(0),
            params.take.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;
    Ok(Json(page.as_ref().clone()))
}

/// `GET /api/projects/{id}`
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectDto>, ApiError> {
    match state.listing.get(id).await? {
        Some(dto) => Ok(Json(dto.as_ref().clone())),
        None => Err(ApiError::NotFound),
    }
}

/// `POST /api/projects`. Owner only.
pub async fn create_project(
    State(state): State<AppState>,
    OwnerAuth(caller): OwnerAuth,
    Json(body): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    body.validate()?;

    tracing::debug!(caller = %caller.subject, "create project requested");
    let project = state.mutations.create(body.into_draft()).await?;
    let location = format!("/api/projects/{}", project.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProjectDto::from(&project)),
    ))
}

/// `DELETE /api/projects/{id}`. Owner only.
pub async fn delete_project(
    State(state): State<AppState>,
    OwnerAuth(caller): OwnerAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(caller = %caller.subject, %id, "delete project requested");
    if state.mutations.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
