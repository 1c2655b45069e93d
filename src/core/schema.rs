//! The validate-and-transform contract implemented by all schemas
//!
//! A schema receives raw input (the query map or the decoded body) and
//! returns either the transformed value or the list of issues explaining the
//! rejection. Consumers always see post-transform values, never raw input.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A single field-level validation error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Issue {
    /// Path to the offending field (empty for root-level issues)
    pub path: Vec<String>,
    /// Machine-readable error code (`required`, `invalid`, `invalid_type`, ...)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl Issue {
    /// Create an issue for a specific field path
    pub fn new(
        path: impl IntoIterator<Item = impl Into<String>>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an issue for the input as a whole
    pub fn root(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors produced by a single schema run
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input was rejected; carries the full issue list
    #[error("input rejected ({} issue(s))", .0.len())]
    Invalid(Vec<Issue>),

    /// The schema itself failed, e.g. a transform errored. Not a client error.
    #[error("schema failure: {0}")]
    Internal(anyhow::Error),
}

/// Validate-and-transform contract.
///
/// Implementations must be shareable across requests; route layers hold them
/// behind `Arc` and call [`Schema::validate`] once per request and source.
pub trait Schema: Send + Sync {
    /// Validate `input`, returning the transformed value or the issue list.
    fn validate(&self, input: Value) -> Result<Value, SchemaError>;
}

/// Plain functions and closures act as schemas, which keeps one-off
/// validations and test doubles cheap.
impl<F> Schema for F
where
    F: Fn(Value) -> Result<Value, SchemaError> + Send + Sync,
{
    fn validate(&self, input: Value) -> Result<Value, SchemaError> {
        self(input)
    }
}
