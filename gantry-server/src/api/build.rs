//! Build API Handlers
//!
//! HTTP endpoints for listing and reading builds.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use gantry_core::dto::build::{BuildView, QueryError};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /jobs/{id}/builds
/// List the builds of a job
///
/// Query parameters (all optional):
/// - `sort`: `asc` or `desc`
/// - `sortBy`: build field to order by, defaults to `createTime`
/// - `page`, `count`: page window, either one activates pagination
pub async fn list_job_builds(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<BuildView>>> {
    let Query(raw) = query.map_err(|rejection| QueryError::Malformed(rejection.body_text()))?;

    tracing::debug!("Listing builds for job: {}", job_id);

    let builds = state.builds.list_builds(&job_id, &raw).await?;

    Ok(Json(builds))
}

/// GET /builds/{id}
/// Get a single build by ID
pub async fn get_build(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BuildView>> {
    let build_id: i64 = id.parse().map_err(|_| ApiError::BadRequest {
        message: format!("Invalid build id '{}'", id),
        field: Some("id".to_string()),
    })?;

    tracing::debug!("Getting build: {}", build_id);

    let build = state.builds.get_build(build_id).await?;

    Ok(Json(build))
}
