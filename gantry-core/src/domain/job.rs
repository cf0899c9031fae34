//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named build lane within a pipeline (e.g. `main` or `PR-12`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub pipeline_id: String,
    pub name: String,
    pub create_time: DateTime<Utc>,
}

impl Job {
    /// Whether this job builds a pull request rather than a branch
    pub fn is_pull_request(&self) -> bool {
        self.name.starts_with("PR-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(name: &str) -> Job {
        Job {
            id: "J1".to_string(),
            pipeline_id: "P1".to_string(),
            name: name.to_string(),
            create_time: Utc::now(),
        }
    }

    #[test]
    fn test_pull_request_job() {
        assert!(job("PR-42").is_pull_request());
        assert!(!job("main").is_pull_request());
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let value = serde_json::to_value(job("main")).unwrap();
        assert_eq!(value["pipelineId"], "P1");
        assert!(value.get("createTime").is_some());
    }
}
