//! Job Service
//!
//! Read access to jobs.

use gantry_core::domain::job::Job;
use std::sync::Arc;
use std::time::Duration;

use crate::repository::{JobRepository, RepositoryError, with_timeout};

/// Service error type
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Job {0} does not exist")]
    NotFound(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    timeout: Duration,
}

impl JobService {
    pub fn new(jobs: Arc<dyn JobRepository>, timeout: Duration) -> Self {
        Self { jobs, timeout }
    }

    /// Get a job by ID
    pub async fn get_job(&self, id: &str) -> Result<Job, JobError> {
        with_timeout(self.timeout, self.jobs.find_by_id(id))
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => JobError::NotFound(id.to_string()),
                other => JobError::Upstream(other.to_string()),
            })?
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use chrono::Utc;

    fn service(store: MemoryStore) -> (JobService, Arc<MemoryStore>) {
        let store = Arc::new(store);
        (
            JobService::new(store.clone(), Duration::from_secs(1)),
            store,
        )
    }

    #[tokio::test]
    async fn test_get_existing_job() {
        let (service, _) = service(MemoryStore::new().with_job(Job {
            id: "J1".to_string(),
            pipeline_id: "P1".to_string(),
            name: "PR-3".to_string(),
            create_time: Utc::now(),
        }));

        let job = service.get_job("J1").await.unwrap();
        assert_eq!(job.name, "PR-3");
    }

    #[tokio::test]
    async fn test_get_missing_job() {
        let (service, _) = service(MemoryStore::new());

        let err = service.get_job("nope").await.unwrap_err();
        assert!(matches!(err, JobError::NotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_upstream() {
        let (service, store) = service(MemoryStore::new());
        store.fail();

        let err = service.get_job("J1").await.unwrap_err();
        assert!(matches!(err, JobError::Upstream(_)));
    }
}
