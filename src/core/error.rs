//! Typed error handling for the validation pipeline
//!
//! There is exactly one client-facing error kind: a schema rejected its
//! input, which always renders as HTTP 400 with the issue list of whichever
//! schema failed first. Everything else (unreadable body, a transform
//! blowing up inside a schema) is outside that contract and surfaces as the
//! 500-class [`PreflightError::Internal`] path.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use super::schema::{Issue, SchemaError};

/// The error surface of the crate
#[derive(Debug)]
pub enum PreflightError {
    /// A supplied schema rejected its input
    Validation { issues: Vec<Issue> },

    /// A non-validation failure in the pipeline
    Internal(anyhow::Error),
}

impl PreflightError {
    /// Build a validation failure from an issue list
    pub fn validation(issues: Vec<Issue>) -> Self {
        PreflightError::Validation { issues }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PreflightError::Validation { .. } => StatusCode::BAD_REQUEST,
            PreflightError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PreflightError::Validation { .. } => "VALIDATION_ERROR",
            PreflightError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The carried issue list, if this is a validation failure
    pub fn issues(&self) -> Option<&[Issue]> {
        match self {
            PreflightError::Validation { issues } => Some(issues),
            PreflightError::Internal(_) => None,
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            issues: self.issues().map(<[Issue]>::to_vec),
        }
    }
}

impl fmt::Display for PreflightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightError::Validation { .. } => write!(f, "request validation failed"),
            PreflightError::Internal(err) => write!(f, "internal error: {}", err),
        }
    }
}

impl std::error::Error for PreflightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreflightError::Validation { .. } => None,
            PreflightError::Internal(err) => {
                let source: &(dyn std::error::Error + 'static) = err.as_ref();
                Some(source)
            }
        }
    }
}

impl From<SchemaError> for PreflightError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Invalid(issues) => PreflightError::Validation { issues },
            SchemaError::Internal(err) => PreflightError::Internal(err),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level issues for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
}

impl IntoResponse for PreflightError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
