//! Build Repository
//!
//! Handles all database operations related to builds, including the ordered
//! and paginated listing of a job's builds.

use async_trait::async_trait;
use gantry_core::domain::build::Build;
use gantry_core::domain::listing::{ListingConfig, Pagination, SortDirection, SortField};
use sqlx::PgPool;

use super::RepositoryError;

/// Repository trait for build reads
#[async_trait]
pub trait BuildRepository: Send + Sync {
    /// List the builds of a job
    ///
    /// Builds are ordered by `config.sort_by` in `config.sort_direction`, ties
    /// broken by build id in the same direction, and cut to the page window
    /// when `config.pagination` is set. Fails with `NotFound` when the job
    /// itself does not exist.
    async fn list_for_job(
        &self,
        job_id: &str,
        config: &ListingConfig,
    ) -> Result<Vec<Build>, RepositoryError>;

    /// Find a build by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Build>, RepositoryError>;
}

/// Postgres implementation of BuildRepository
#[derive(Debug, Clone)]
pub struct PgBuildRepository {
    pool: PgPool,
}

impl PgBuildRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BUILD_COLUMNS: &str = "id, job_id, number, sha, cause, status, create_time, start_time, end_time, meta";

#[async_trait]
impl BuildRepository for PgBuildRepository {
    async fn list_for_job(
        &self,
        job_id: &str,
        config: &ListingConfig,
    ) -> Result<Vec<Build>, RepositoryError> {
        let mut sql = format!(
            "SELECT {} FROM builds WHERE job_id = $1 ORDER BY {}",
            BUILD_COLUMNS,
            order_clause(config)
        );
        if config.pagination.is_some() {
            sql.push_str(" LIMIT $2 OFFSET $3");
        }

        let mut query = sqlx::query_as::<_, BuildRow>(&sql).bind(job_id);
        if let Some(pagination) = config.pagination {
            let (limit, offset) = page_bounds(pagination);
            query = query.bind(limit).bind(offset);
        }

        let rows = query.fetch_all(&self.pool).await?;

        // An empty page is ambiguous: the job may have been deleted since lookup
        if rows.is_empty() {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
                .bind(job_id)
                .fetch_one(&self.pool)
                .await?;
            if !exists {
                return Err(RepositoryError::NotFound(format!("Job {}", job_id)));
            }
        }

        rows.into_iter().map(Build::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Build>, RepositoryError> {
        let sql = format!("SELECT {} FROM builds WHERE id = $1", BUILD_COLUMNS);

        let row = sqlx::query_as::<_, BuildRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Build::try_from).transpose()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Number => "number",
        SortField::CreateTime => "create_time",
        SortField::StartTime => "start_time",
        SortField::EndTime => "end_time",
        SortField::Status => "status",
    }
}

/// ORDER BY clause for a listing
///
/// Only whitelisted column names are ever interpolated. NULLs go last when
/// ascending and first when descending so the two directions mirror each other.
fn order_clause(config: &ListingConfig) -> String {
    let direction = match config.sort_direction {
        SortDirection::Asc => "ASC NULLS LAST",
        SortDirection::Desc => "DESC NULLS FIRST",
    };

    match config.sort_by {
        SortField::Id => format!("id {}", direction),
        field => format!("{} {}, id {}", sort_column(field), direction, direction),
    }
}

/// LIMIT and OFFSET bind values for a page window
fn page_bounds(pagination: Pagination) -> (i64, i64) {
    let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
    (i64::from(pagination.count), offset)
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct BuildRow {
    id: i64,
    job_id: String,
    number: i64,
    sha: String,
    cause: String,
    status: String,
    create_time: chrono::DateTime<chrono::Utc>,
    start_time: Option<chrono::DateTime<chrono::Utc>>,
    end_time: Option<chrono::DateTime<chrono::Utc>>,
    meta: serde_json::Value,
}

impl TryFrom<BuildRow> for Build {
    type Error = RepositoryError;

    fn try_from(row: BuildRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| RepositoryError::Backend(format!("build {}: {}", row.id, e)))?;

        let meta = serde_json::from_value(row.meta)
            .map_err(|e| RepositoryError::Backend(format!("build {}: meta {}", row.id, e)))?;

        Ok(Build {
            id: row.id,
            job_id: row.job_id,
            number: row.number,
            sha: row.sha,
            cause: row.cause,
            status,
            create_time: row.create_time,
            start_time: row.start_time,
            end_time: row.end_time,
            meta,
        })
    }
}
