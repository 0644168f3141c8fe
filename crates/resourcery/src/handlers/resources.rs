//! Resource CRUD handlers.
//!
//! Thin wrappers: validate the payload, call one repository method, map the
//! result into the response envelope. Cache interaction and event publishing
//! are handled by the cached repository decorator.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use resourcery_auth::AuthenticatedUser;
use resourcery_core::resource::{Resource, ValidationError};
use resourcery_core::storage::{Page, DEFAULT_PAGE};

use crate::{handlers::ApiError, models::{CreateResource, UpdateResource}, state::AppState};

/// Maps a body-extraction rejection into the validation error family.
fn malformed_body(rejection: JsonRejection) -> ApiError {
    ApiError(ValidationError::MalformedBody(rejection.body_text()).into())
}

/// Query parameters for listing resources.
#[derive(Debug, Deserialize)]
pub struct ListResourcesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List resources (GET /api/v1/resources).
///
/// Pagination only applies when the aggregate cache key is cold; a warm
/// cache serves the full collection (see the cached repository docs).
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ListResourcesQuery>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let page = Page::new(
        query.page.unwrap_or(DEFAULT_PAGE),
        query.per_page.unwrap_or(state.default_per_page),
    )?;

    let resources = state.resources.paginate_resources(page).await?;
    Ok(Json(resources))
}

/// Create a new resource (POST /api/v1/resources).
pub async fn create_resource(
    State(state): State<AppState>,
    payload: Result<Json<CreateResource>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(malformed_body)?;

    let data = payload.into_new()?;
    let resource = state.resources.create_resource(data).await?;

    tracing::info!(resource_id = %resource.id, title = %resource.title, "Created new resource");
    Ok((StatusCode::CREATED, Json(resource)))
}

/// Get a resource by id (GET /api/v1/resources/{id}).
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError> {
    let resource = state.resources.get_resource(id).await?;
    Ok(Json(resource))
}

/// Partially update a resource (PATCH /api/v1/resources/{id}).
pub async fn update_resource(
    AuthenticatedUser(claims): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateResource>, JsonRejection>,
) -> Result<Json<Resource>, ApiError> {
    let Json(payload) = payload.map_err(malformed_body)?;

    let patch = payload.into_patch()?;
    let resource = state.resources.update_resource(id, patch).await?;

    tracing::info!(resource_id = %id, user_id = %claims.sub, "Updated resource");
    Ok(Json(resource))
}

/// Delete a resource (DELETE /api/v1/resources/{id}).
pub async fn delete_resource(
    AuthenticatedUser(claims): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.resources.delete_resource(id).await?;

    tracing::info!(resource_id = %id, user_id = %claims.sub, "Deleted resource");
    Ok(StatusCode::NO_CONTENT)
}
