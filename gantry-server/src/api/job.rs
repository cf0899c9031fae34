//! Job API Handlers
//!
//! HTTP endpoints for reading jobs.

use axum::{
    Json,
    extract::{Path, State},
};
use gantry_core::domain::job::Job;

use crate::api::AppState;
use crate::api::error::ApiResult;

/// GET /jobs/{id}
/// Get job details by ID
pub async fn get_job(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Job>> {
    tracing::debug!("Getting job: {}", id);

    let job = state.jobs.get_job(&id).await?;

    Ok(Json(job))
}
