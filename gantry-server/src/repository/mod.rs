//! Repository Module
//!
//! Data access layer for the server.
//! Each repository handles storage operations for a specific domain entity.
//!
//! Repositories are trait-based so services can run against Postgres in
//! production and against an in-memory store in tests.

mod build;
mod job;
#[cfg(test)]
pub mod memory;

use std::time::Duration;

// Re-export traits
pub use build::BuildRepository;
pub use job::JobRepository;

// Re-export implementations
pub use build::PgBuildRepository;
pub use job::PgJobRepository;

/// Repository error type
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The entity the operation is scoped to does not exist
    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be mapped or the backend misbehaved
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),
}

/// Run a repository call with an upper bound on its duration
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| RepositoryError::Timeout(limit))?
}
