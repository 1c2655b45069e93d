//! The validation routine shared by the route wrapper and the query accessor
//!
//! Given the raw inputs of a request and the schemas attached to its route,
//! validate each supplied source and collect the transformed results. Query
//! is always validated before body, and the first rejection wins: the other
//! source is not attempted (fail-fast across sources, not aggregate-all).

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use super::error::PreflightError;
use super::schema::Schema;

/// Validated data for one request.
///
/// Created fresh per request and attached to the request's extensions by the
/// route wrapper, where the [`Parsed`](crate::server::Parsed) extractor reads
/// it. Holds the *transformed* output of each schema, never raw input.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedData {
    /// Transformed query value, if a query schema was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    /// Transformed body value, if a body schema was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Schemas attached to one route.
///
/// Both slots are optional; supplying neither makes validation a no-op.
#[derive(Clone, Default)]
pub struct RouteSchemas {
    pub(crate) query: Option<Arc<dyn Schema>>,
    pub(crate) body: Option<Arc<dyn Schema>>,
}

impl RouteSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a schema for the request's query parameters
    pub fn query(mut self, schema: impl Schema + 'static) -> Self {
        self.query = Some(Arc::new(schema));
        self
    }

    /// Attach a schema for the request's JSON body
    pub fn body(mut self, schema: impl Schema + 'static) -> Self {
        self.body = Some(Arc::new(schema));
        self
    }

    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl fmt::Debug for RouteSchemas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSchemas")
            .field("query", &self.query.is_some())
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// Run one schema over one source, mapping the rejection into the crate error.
pub(crate) fn validate_one(schema: &dyn Schema, input: Value) -> Result<Value, PreflightError> {
    schema.validate(input).map_err(PreflightError::from)
}

/// Validate each supplied source against its schema.
///
/// `query_input` / `body_input` are expected to be `Some` exactly when the
/// corresponding schema is; a missing input falls back to an empty object
/// (query) or `null` (body) so the schema still decides the outcome.
pub fn validate_sources(
    schemas: &RouteSchemas,
    query_input: Option<Value>,
    body_input: Option<Value>,
) -> Result<ParsedData, PreflightError> {
    let mut parsed = ParsedData::default();

    if let Some(schema) = schemas.query.as_deref() {
        let input = query_input.unwrap_or_else(|| Value::Object(Map::new()));
        parsed.query = Some(validate_one(schema, input)?);
    }

    if let Some(schema) = schemas.body.as_deref() {
        let input = body_input.unwrap_or(Value::Null);
        parsed.body = Some(validate_one(schema, input)?);
    }

    Ok(parsed)
}
