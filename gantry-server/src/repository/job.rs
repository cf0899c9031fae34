//! Job Repository
//!
//! Handles all database operations related to jobs.

use async_trait::async_trait;
use gantry_core::domain::job::Job;
use sqlx::PgPool;

use super::RepositoryError;

/// Repository trait for job lookups
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Find a job by ID, `None` when no such job exists
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>, RepositoryError>;
}

/// Postgres implementation of JobRepository
#[derive(Debug, Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, pipeline_id, name, create_time
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: String,
    pipeline_id: String,
    name: String,
    create_time: chrono::DateTime<chrono::Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            pipeline_id: row.pipeline_id,
            name: row.name,
            create_time: row.create_time,
        }
    }
}
