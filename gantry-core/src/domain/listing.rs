//! Build listing configuration
//!
//! A `ListingConfig` is derived fresh for every listing request and handed to
//! the build repository, which applies ordering and the page window.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Direction of the primary ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Build fields a listing can be ordered by
///
/// Names match the JSON field names of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Number,
    #[default]
    CreateTime,
    StartTime,
    EndTime,
    Status,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Id,
        SortField::Number,
        SortField::CreateTime,
        SortField::StartTime,
        SortField::EndTime,
        SortField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Number => "number",
            SortField::CreateTime => "createTime",
            SortField::StartTime => "startTime",
            SortField::EndTime => "endTime",
            SortField::Status => "status",
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// A page window over an ordered listing (pages are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub count: u32,
}

impl Pagination {
    /// Number of items skipped before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.count)
    }
}

/// Ordering and page window for one listing request
///
/// Ties on the sort field are broken by build id in the same direction, so
/// reversing the direction reverses the listing exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingConfig {
    pub sort_direction: SortDirection,
    pub sort_by: SortField,
    pub pagination: Option<Pagination>,
}
