//! Build DTOs
//!
//! `BuildView` is the response shape of every build endpoint and
//! `ListBuildsQuery` is the typed form of the `GET /jobs/{id}/builds` query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::build::{Build, BuildStatus};
use crate::domain::listing::{ListingConfig, Pagination, SortDirection, SortField};

/// Serialized projection of a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildView {
    pub id: i64,
    pub job_id: String,
    pub number: i64,
    pub sha: String,
    pub cause: String,
    pub status: BuildStatus,
    pub create_time: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub meta: HashMap<String, serde_json::Value>,
}

impl From<Build> for BuildView {
    fn from(build: Build) -> Self {
        BuildView {
            id: build.id,
            job_id: build.job_id,
            number: build.number,
            sha: build.sha,
            cause: build.cause,
            status: build.status,
            create_time: build.create_time,
            start_time: build.start_time,
            end_time: build.end_time,
            meta: build.meta,
        }
    }
}

/// Validated query of a build listing request
///
/// Every field is optional. Serializing it yields the query string the server
/// accepts, which is how the client builds its requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBuildsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Rejection of a listing query, raised before any data access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Unsupported query parameter '{0}'")]
    UnknownParameter(String),

    #[error("Query parameter '{0}' was given more than once")]
    DuplicateParameter(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Malformed query string: {0}")]
    Malformed(String),
}

impl QueryError {
    /// Name of the offending query parameter, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            QueryError::UnknownParameter(name) | QueryError::DuplicateParameter(name) => {
                Some(name)
            }
            QueryError::InvalidValue { field, .. } => Some(field),
            QueryError::Malformed(_) => None,
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        QueryError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

impl ListBuildsQuery {
    /// Validate raw query pairs
    ///
    /// Only `sort`, `sortBy`, `page` and `count` are accepted, each at most
    /// once. `page` and `count` must be positive and `count` may not exceed
    /// `max_count`.
    pub fn from_pairs(pairs: &[(String, String)], max_count: u32) -> Result<Self, QueryError> {
        let mut query = ListBuildsQuery::default();
        let mut seen = HashSet::new();

        for (key, value) in pairs {
            if !seen.insert(key.as_str()) {
                return Err(QueryError::DuplicateParameter(key.clone()));
            }

            match key.as_str() {
                "sort" => {
                    let sort = value
                        .parse()
                        .map_err(|_| QueryError::invalid("sort", "expected one of: asc, desc"))?;
                    query.sort = Some(sort);
                }
                "sortBy" => {
                    let sort_by = value.parse().map_err(|_| {
                        let names: Vec<&str> = SortField::ALL.iter().map(|f| f.as_str()).collect();
                        QueryError::invalid(
                            "sortBy",
                            format!("expected one of: {}", names.join(", ")),
                        )
                    })?;
                    query.sort_by = Some(sort_by);
                }
                "page" => query.page = Some(parse_positive("page", value)?),
                "count" => {
                    let count = parse_positive("count", value)?;
                    if count > max_count {
                        return Err(QueryError::invalid(
                            "count",
                            format!("must be at most {}", max_count),
                        ));
                    }
                    query.count = Some(count);
                }
                _ => return Err(QueryError::UnknownParameter(key.clone())),
            }
        }

        Ok(query)
    }

    /// Whether a page window was requested
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.count.is_some()
    }

    /// Derive the listing configuration for this query
    ///
    /// When only one of `page`/`count` is given the other falls back to page 1
    /// or `default_count` respectively.
    pub fn to_config(&self, default_count: u32) -> ListingConfig {
        let pagination = self.is_paginated().then(|| Pagination {
            page: self.page.unwrap_or(1),
            count: self.count.unwrap_or(default_count),
        });

        ListingConfig {
            sort_direction: self.sort.unwrap_or_default(),
            sort_by: self.sort_by.unwrap_or_default(),
            pagination,
        }
    }
}

fn parse_positive(field: &'static str, value: &str) -> Result<u32, QueryError> {
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(QueryError::invalid(field, "expected a positive integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query() {
        let query = ListBuildsQuery::from_pairs(&[], 100).unwrap();
        assert_eq!(query, ListBuildsQuery::default());
        assert_eq!(query.to_config(50), ListingConfig::default());
    }

    #[test]
    fn test_full_query() {
        let query = ListBuildsQuery::from_pairs(
            &pairs(&[
                ("sort", "desc"),
                ("sortBy", "number"),
                ("page", "2"),
                ("count", "25"),
            ]),
            100,
        )
        .unwrap();

        let config = query.to_config(50);
        assert_eq!(config.sort_direction, SortDirection::Desc);
        assert_eq!(config.sort_by, SortField::Number);
        assert_eq!(config.pagination, Some(Pagination { page: 2, count: 25 }));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = ListBuildsQuery::from_pairs(&pairs(&[("foo", "bar")]), 100).unwrap_err();
        assert_eq!(err, QueryError::UnknownParameter("foo".to_string()));
        assert_eq!(err.field(), Some("foo"));
    }

    #[test]
    fn test_parameter_names_are_case_sensitive() {
        let err = ListBuildsQuery::from_pairs(&pairs(&[("sortby", "id")]), 100).unwrap_err();
        assert_eq!(err.field(), Some("sortby"));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = ListBuildsQuery::from_pairs(&pairs(&[("page", "1"), ("page", "2")]), 100)
            .unwrap_err();
        assert_eq!(err, QueryError::DuplicateParameter("page".to_string()));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("sort", "sideways"),
            ("sort", ""),
            ("sortBy", "sha"),
            ("page", "0"),
            ("page", "-1"),
            ("page", "1.5"),
            ("count", "abc"),
            ("count", "101"),
        ];

        for (key, value) in cases {
            let err = ListBuildsQuery::from_pairs(&pairs(&[(key, value)]), 100).unwrap_err();
            assert_eq!(err.field(), Some(key), "{}={}", key, value);
        }
    }

    #[test]
    fn test_count_at_limit_is_accepted() {
        let query = ListBuildsQuery::from_pairs(&pairs(&[("count", "100")]), 100).unwrap();
        assert_eq!(query.count, Some(100));
    }

    #[test]
    fn test_page_without_count_uses_default_count() {
        let query = ListBuildsQuery::from_pairs(&pairs(&[("page", "3")]), 100).unwrap();
        assert_eq!(
            query.to_config(50).pagination,
            Some(Pagination { page: 3, count: 50 })
        );
    }

    #[test]
    fn test_count_without_page_starts_at_first_page() {
        let query = ListBuildsQuery::from_pairs(&pairs(&[("count", "5")]), 100).unwrap();
        assert_eq!(
            query.to_config(50).pagination,
            Some(Pagination { page: 1, count: 5 })
        );
    }

    #[test]
    fn test_query_serializes_to_accepted_pairs() {
        let query = ListBuildsQuery {
            sort: Some(SortDirection::Desc),
            sort_by: Some(SortField::CreateTime),
            page: None,
            count: Some(10),
        };

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "sort": "desc", "sortBy": "createTime", "count": 10 })
        );
    }

    #[test]
    fn test_build_view_projection() {
        let build = Build {
            id: 7,
            job_id: "J1".to_string(),
            number: 1_700_000_000,
            sha: "deadbeef".to_string(),
            cause: "Started by user".to_string(),
            status: BuildStatus::Running,
            create_time: Utc::now(),
            start_time: Some(Utc::now()),
            end_time: None,
            meta: HashMap::from([("foo".to_string(), serde_json::json!("bar"))]),
        };

        let view = BuildView::from(build.clone());
        assert_eq!(view.id, build.id);
        assert_eq!(view.job_id, build.job_id);
        assert_eq!(view.status, build.status);
        assert_eq!(view.create_time, build.create_time);
        assert_eq!(view.meta, build.meta);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["jobId"], "J1");
        assert_eq!(json["status"], "RUNNING");
        assert!(json["endTime"].is_null());
    }
}
