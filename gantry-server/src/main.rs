//! Gantry Server
//!
//! Read API over CI jobs and their builds.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Repositories: Postgres access for jobs and builds
//! - Services: Validation, job resolution, listing and projection
//! - API: axum handlers, bearer token layer, error-to-status mapping

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod db;
mod repository;
mod service;

use crate::api::AppState;
use crate::config::Config;
use crate::repository::{BuildRepository, JobRepository, PgBuildRepository, PgJobRepository};
use crate::service::{BuildListingService, JobService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gantry server...");

    let config = Config::from_env()?;
    config.validate().context("Invalid configuration")?;

    if config.api_tokens.is_empty() {
        tracing::warn!("No API tokens configured; all job and build requests will be rejected");
    } else {
        tracing::info!("Loaded {} API token(s)", config.api_tokens.len());
    }

    tracing::info!("Connecting to database...");

    // Create database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    tracing::info!("Database connection pool created");

    // Run migrations
    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let jobs: Arc<dyn JobRepository> = Arc::new(PgJobRepository::new(pool.clone()));
    let builds: Arc<dyn BuildRepository> = Arc::new(PgBuildRepository::new(pool));

    let state = AppState {
        jobs: JobService::new(jobs.clone(), config.upstream_timeout),
        builds: BuildListingService::new(jobs, builds, config.listing_settings()),
        tokens: Arc::new(config.api_tokens.clone()),
    };

    // Build router with all API endpoints
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
