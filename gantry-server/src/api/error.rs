//! API Error Handling
//!
//! Unified error type and the error-kind to HTTP status table.
//! Services never pick status codes; handlers convert service errors here.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gantry_core::dto::build::QueryError;

use crate::service::{BuildError, JobError};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request shape rejected, optionally naming the offending field
    BadRequest {
        message: String,
        field: Option<String>,
    },
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    /// Storage failure; the detail is logged, never returned
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "validation",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Upstream(_) => "upstream",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let (message, field) = match self {
            ApiError::BadRequest { message, field } => (message, field),
            ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) | ApiError::NotFound(msg) => {
                (msg, None)
            }
            ApiError::Upstream(detail) => {
                tracing::error!("Upstream error: {}", detail);
                ("Internal server error".to_string(), None)
            }
        };

        let mut body = serde_json::json!({ "error": message, "kind": kind });
        if let Some(field) = field {
            body["field"] = serde_json::Value::String(field);
        }

        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::BadRequest {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Validation(err) => err.into(),
            BuildError::JobNotFound(_) | BuildError::NotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BuildError::Upstream(detail) => ApiError::Upstream(detail),
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::NotFound(_) => ApiError::NotFound(err.to_string()),
            JobError::Upstream(detail) => ApiError::Upstream(detail),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
