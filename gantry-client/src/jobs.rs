//! Job-related API endpoints

use crate::GantryClient;
use crate::error::Result;
use gantry_core::domain::job::Job;

impl GantryClient {
    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job identifier
    ///
    /// # Returns
    /// The job details
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let url = self.endpoint(&["jobs", job_id])?;
        tracing::debug!("GET {}", url);

        let response = self.get(url).send().await?;

        self.handle_response(response).await
    }
}
