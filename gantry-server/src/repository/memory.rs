//! In-memory repositories for tests
//!
//! `MemoryStore` implements both repository traits over plain vectors and
//! counts every call so tests can assert when storage was (not) touched.

use async_trait::async_trait;
use gantry_core::domain::build::Build;
use gantry_core::domain::job::Job;
use gantry_core::domain::listing::{ListingConfig, SortDirection, SortField};
use std::cmp::Ordering;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

use super::{BuildRepository, JobRepository, RepositoryError};

#[derive(Default)]
pub struct MemoryStore {
    jobs: Mutex<Vec<Job>>,
    builds: Mutex<Vec<Build>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(self, job: Job) -> Self {
        self.jobs.lock().unwrap().push(job);
        self
    }

    pub fn with_build(self, build: Build) -> Self {
        self.builds.lock().unwrap().push(build);
        self
    }

    /// Make every subsequent call fail with a backend error
    pub fn fail(&self) {
        self.failing.store(true, AtomicOrdering::SeqCst);
    }

    /// Make every subsequent call sleep before answering
    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    async fn enter(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(AtomicOrdering::SeqCst) {
            return Err(RepositoryError::Backend("connection reset".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Job>, RepositoryError> {
        self.enter().await?;

        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().find(|job| job.id == id).cloned())
    }
}

#[async_trait]
impl BuildRepository for MemoryStore {
    async fn list_for_job(
        &self,
        job_id: &str,
        config: &ListingConfig,
    ) -> Result<Vec<Build>, RepositoryError> {
        self.enter().await?;

        if !self.jobs.lock().unwrap().iter().any(|job| job.id == job_id) {
            return Err(RepositoryError::NotFound(format!("Job {}", job_id)));
        }

        let mut builds: Vec<Build> = self
            .builds
            .lock()
            .unwrap()
            .iter()
            .filter(|build| build.job_id == job_id)
            .cloned()
            .collect();

        builds.sort_by(|a, b| {
            let ordering = compare(a, b, config.sort_by);
            match config.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(match config.pagination {
            Some(pagination) => builds
                .into_iter()
                .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
                .take(pagination.count as usize)
                .collect(),
            None => builds,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Build>, RepositoryError> {
        self.enter().await?;

        let builds = self.builds.lock().unwrap();
        Ok(builds.iter().find(|build| build.id == id).cloned())
    }
}

/// Ascending order matching the Postgres ORDER BY the real repository emits
fn compare(a: &Build, b: &Build, field: SortField) -> Ordering {
    let primary = match field {
        SortField::Id => Ordering::Equal,
        SortField::Number => a.number.cmp(&b.number),
        SortField::CreateTime => a.create_time.cmp(&b.create_time),
        SortField::StartTime => nulls_last(a.start_time, b.start_time),
        SortField::EndTime => nulls_last(a.end_time, b.end_time),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    };

    primary.then(a.id.cmp(&b.id))
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}
