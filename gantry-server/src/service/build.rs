//! Build Service
//!
//! Business logic for reading builds, most importantly the sorted and
//! paginated listing of a job's builds.

use gantry_core::dto::build::{BuildView, ListBuildsQuery, QueryError};
use std::sync::Arc;
use std::time::Duration;

use crate::repository::{BuildRepository, JobRepository, RepositoryError, with_timeout};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] QueryError),

    #[error("Job {0} does not exist")]
    JobNotFound(String),

    #[error("Build {0} does not exist")]
    NotFound(i64),

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

/// Limits applied to every listing request
#[derive(Debug, Clone, Copy)]
pub struct ListingSettings {
    /// Page size used when `page` is given without `count`
    pub default_page_size: u32,
    /// Largest accepted `count`
    pub max_page_size: u32,
    /// Upper bound for each repository call
    pub upstream_timeout: Duration,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 100,
            upstream_timeout: Duration::from_secs(5),
        }
    }
}

/// Lists and fetches builds
///
/// Holds only shared repository handles and immutable settings, so clones
/// can serve any number of concurrent requests.
#[derive(Clone)]
pub struct BuildListingService {
    jobs: Arc<dyn JobRepository>,
    builds: Arc<dyn BuildRepository>,
    settings: ListingSettings,
}

impl BuildListingService {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        builds: Arc<dyn BuildRepository>,
        settings: ListingSettings,
    ) -> Self {
        Self {
            jobs,
            builds,
            settings,
        }
    }

    /// List the builds of a job
    ///
    /// The raw query is validated before any repository is touched. The job
    /// must exist; its builds come back in the requested order and window.
    pub async fn list_builds(
        &self,
        job_id: &str,
        raw_query: &[(String, String)],
    ) -> Result<Vec<BuildView>, BuildError> {
        let query = ListBuildsQuery::from_pairs(raw_query, self.settings.max_page_size)?;

        let job = with_timeout(self.settings.upstream_timeout, self.jobs.find_by_id(job_id))
            .await
            .map_err(|e| job_lookup_error(e, job_id))?
            .ok_or_else(|| BuildError::JobNotFound(job_id.to_string()))?;

        let config = query.to_config(self.settings.default_page_size);
        tracing::debug!("Listing builds for job {} with {:?}", job.id, config);

        let builds = with_timeout(
            self.settings.upstream_timeout,
            self.builds.list_for_job(&job.id, &config),
        )
        .await
        .map_err(|e| job_lookup_error(e, job_id))?;

        Ok(builds.into_iter().map(BuildView::from).collect())
    }

    /// Get a single build by ID
    pub async fn get_build(&self, id: i64) -> Result<BuildView, BuildError> {
        let build = with_timeout(self.settings.upstream_timeout, self.builds.find_by_id(id))
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => BuildError::NotFound(id),
                other => BuildError::Upstream(other.to_string()),
            })?
            .ok_or(BuildError::NotFound(id))?;

        Ok(build.into())
    }
}

fn job_lookup_error(err: RepositoryError, job_id: &str) -> BuildError {
    match err {
        RepositoryError::NotFound(_) => BuildError::JobNotFound(job_id.to_string()),
        other => BuildError::Upstream(other.to_string()),
    }
}
