//! # API Errors
//!
//! Error types for the HTTP boundary, serialized in the person API's
//! wire shape:
//! - 422 `{"detail": [{"type", "loc", "msg", "input"}, ...]}`
//! - 404 `{"detail": "Person not found"}`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::{Problem, ProblemKind, ValidationError};

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Where a rejected value was extracted from; the first `loc` segment.
///
/// Urlencoded and multipart form fields report as `body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Request path segments
    Path,
    /// Query string
    Query,
    /// JSON or form body
    Body,
}

impl Source {
    /// The wire label for this source
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Body => "body",
        }
    }
}

/// One entry in a 422 detail list
#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    /// Machine code (e.g. "missing", "greater_than")
    #[serde(rename = "type")]
    pub error_type: String,
    /// Source label followed by the field path
    pub loc: Vec<String>,
    /// Human-readable message
    pub msg: String,
    /// Offending input, when one was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl Detail {
    /// Builds a detail entry from a core problem
    pub fn from_problem(source: Source, problem: &Problem) -> Self {
        let mut loc = Vec::with_capacity(problem.path.len() + 1);
        loc.push(source.as_str().to_string());
        loc.extend(problem.path.iter().cloned());
        Self {
            error_type: problem.kind.code().to_string(),
            loc,
            msg: problem.kind.message(),
            input: problem.input.clone(),
        }
    }
}

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Input failed schema validation
    #[error("unprocessable input ({} problem(s))", details.len())]
    Unprocessable { details: Vec<Detail> },

    /// Person id not in the directory
    #[error("Person not found")]
    PersonNotFound,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PersonNotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Wraps core validation problems from a single source
    pub fn validation(source: Source, err: ValidationError) -> Self {
        Self::validation_many(vec![(source, err)])
    }

    /// Aggregates validation failures from several sources into one
    /// detail list, in the given source order.
    pub fn validation_many(failures: Vec<(Source, ValidationError)>) -> Self {
        let details = failures
            .iter()
            .flat_map(|(source, err)| {
                err.problems()
                    .iter()
                    .map(|problem| Detail::from_problem(*source, problem))
            })
            .collect();
        Self::Unprocessable { details }
    }

    /// A single missing-field failure at the given source
    pub fn missing(source: Source, field: &str) -> Self {
        Self::Unprocessable {
            details: vec![Detail::from_problem(
                source,
                &Problem::at(field, ProblemKind::Missing, None),
            )],
        }
    }

    /// A body that could not be parsed as JSON at all
    pub fn invalid_json(message: String) -> Self {
        Self::Unprocessable {
            details: vec![Detail {
                error_type: "json_invalid".to_string(),
                loc: vec![Source::Body.as_str().to_string()],
                msg: message,
                input: None,
            }],
        }
    }

    /// A body that could not be parsed as a urlencoded form
    pub fn invalid_form(message: String) -> Self {
        Self::Unprocessable {
            details: vec![Detail {
                error_type: "form_invalid".to_string(),
                loc: vec![Source::Body.as_str().to_string()],
                msg: message,
                input: None,
            }],
        }
    }

    /// A multipart stream that could not be read
    pub fn invalid_multipart(message: String) -> Self {
        Self::Unprocessable {
            details: vec![Detail {
                error_type: "multipart_invalid".to_string(),
                loc: vec![Source::Body.as_str().to_string()],
                msg: message,
                input: None,
            }],
        }
    }
}

/// 422 response body
#[derive(Debug, Serialize)]
struct UnprocessableBody {
    detail: Vec<Detail>,
}

/// 404 response body
#[derive(Debug, Serialize)]
struct NotFoundBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Unprocessable { details } => {
                (status, Json(UnprocessableBody { detail: details })).into_response()
            }
            ApiError::PersonNotFound => (
                status,
                Json(NotFoundBody {
                    detail: "Person not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
