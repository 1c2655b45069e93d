//! Core module containing the schema contract and the validation routine

pub mod error;
pub mod query;
pub mod schema;
pub mod validate;

pub use error::{ErrorResponse, PreflightError};
pub use query::query_to_value;
pub use schema::{Issue, Schema, SchemaError};
pub use validate::{ParsedData, RouteSchemas, validate_sources};
