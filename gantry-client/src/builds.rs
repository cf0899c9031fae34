//! Build-related API endpoints

use crate::GantryClient;
use crate::error::{ClientError, Result};
use gantry_core::dto::build::{BuildView, ListBuildsQuery};

impl GantryClient {
    /// List the builds of a job
    ///
    /// # Arguments
    /// * `job_id` - The job identifier
    /// * `query` - Sort and page options; `ListBuildsQuery::default()` lists
    ///   every build oldest first
    ///
    /// # Returns
    /// The builds in the requested order
    ///
    /// # Example
    /// ```no_run
    /// # use gantry_client::GantryClient;
    /// # use gantry_core::dto::build::ListBuildsQuery;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = GantryClient::new("http://localhost:8080").with_token("secret");
    /// let second_page = client.list_builds("J1", &ListBuildsQuery {
    ///     page: Some(2),
    ///     count: Some(10),
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_builds(&self, job_id: &str, query: &ListBuildsQuery) -> Result<Vec<BuildView>> {
        let request = self.list_builds_request(job_id, query)?;
        tracing::debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;

        self.handle_response(response).await
    }

    /// Get a single build by ID
    pub async fn get_build(&self, build_id: i64) -> Result<BuildView> {
        let url = self.endpoint(&["builds", &build_id.to_string()])?;
        tracing::debug!("GET {}", url);

        let response = self.get(url).send().await?;

        self.handle_response(response).await
    }

    fn list_builds_request(&self, job_id: &str, query: &ListBuildsQuery) -> Result<reqwest::Request> {
        if job_id.is_empty() {
            return Err(ClientError::InvalidRequest("job id cannot be empty".to_string()));
        }

        let url = self.endpoint(&["jobs", job_id, "builds"])?;

        Ok(self.get(url).query(query).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::domain::listing::{SortDirection, SortField};

    fn client() -> GantryClient {
        GantryClient::new("http://localhost:8080").with_token("t")
    }

    #[test]
    fn test_default_query_has_no_parameters() {
        let request = client()
            .list_builds_request("J1", &ListBuildsQuery::default())
            .unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:8080/jobs/J1/builds");
    }

    #[test]
    fn test_query_parameters() {
        let query = ListBuildsQuery {
            sort: Some(SortDirection::Desc),
            sort_by: Some(SortField::StartTime),
            page: Some(2),
            count: Some(10),
        };

        let request = client().list_builds_request("J1", &query).unwrap();
        assert_eq!(
            request.url().query(),
            Some("sort=desc&sortBy=startTime&page=2&count=10")
        );
    }

    #[test]
    fn test_empty_job_id_rejected() {
        let err = client()
            .list_builds_request("", &ListBuildsQuery::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
