//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod auth;
pub mod build;
pub mod error;
pub mod health;
pub mod job;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::auth::TokenTable;
use crate::service::{BuildListingService, JobService};

/// Shared handler state
///
/// Services only hold repository handles and settings; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub jobs: JobService,
    pub builds: BuildListingService,
    pub tokens: Arc<TokenTable>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let authenticated = Router::new()
        // Job endpoints
        .route("/jobs/{id}", get(job::get_job))
        .route("/jobs/{id}/builds", get(build::list_job_builds))
        // Build endpoints
        .route("/builds/{id}", get(build::get_build))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .merge(authenticated)
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
