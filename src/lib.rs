//! # Preflight
//!
//! Schema validation middleware for [axum]: validate query parameters and
//! JSON bodies *before* a handler runs, and hand the handler the transformed
//! result.
//!
//! ## Features
//!
//! - **Route Wrapping**: attach schemas to a route with a tower layer; the
//!   handler only runs once every supplied schema accepted its input
//! - **Fail-Fast Ordering**: query is validated before body and the first
//!   rejection wins, so clients get one coherent issue list
//! - **Transformed Values**: handlers read post-transform data (a query
//!   string coerced to a boolean arrives as a boolean)
//! - **Raw Access Preserved**: wrapped handlers can still read the original
//!   query and body; validation adds a view, it removes nothing
//! - **Pluggable Schemas**: anything implementing [`Schema`] works — the
//!   built-in [`ObjectSchema`], a [`TypedSchema`] over `validator` derive
//!   rules, or a plain closure
//! - **One Error Shape**: every rejection renders as a 400 with a
//!   field-level issue list; everything else stays out of the contract
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use preflight::prelude::*;
//!
//! let schemas = RouteSchemas::new()
//!     .query(ObjectSchema::new().field(
//!         "verbose",
//!         FieldRule::optional()
//!             .check(validators::string())
//!             .map(transforms::to_boolean()),
//!     ))
//!     .body(ObjectSchema::new().field(
//!         "name",
//!         FieldRule::required().check(validators::string()),
//!     ));
//!
//! let app = Router::new().route(
//!     "/items",
//!     post(create_item).layer(ValidateLayer::new(schemas)),
//! );
//!
//! async fn create_item(Parsed(data): Parsed) -> Json<Value> {
//!     // data.body["name"] is a known-valid string here
//!     Json(data.body.unwrap())
//! }
//! ```
//!
//! For one-off checks inside a handler body, [`validated_query`] validates
//! the query on the spot and its error bubbles up as the same 400 response.
//!
//! [`Schema`]: core::schema::Schema
//! [`ObjectSchema`]: schema::ObjectSchema
//! [`TypedSchema`]: schema::TypedSchema
//! [`validated_query`]: server::validated_query

pub mod core;
pub mod schema;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ErrorResponse, PreflightError},
        schema::{Issue, Schema, SchemaError},
        validate::{ParsedData, RouteSchemas, validate_sources},
    };

    // === Schemas ===
    pub use crate::schema::{FieldRule, ObjectSchema, TypedSchema, transforms, validators};

    // === Server ===
    pub use crate::server::{Parsed, ValidateLayer, ValidatedQuery, validated_query};

    // === External dependencies ===
    pub use serde_json::{Value, json};
    pub use validator::Validate;

    // === Axum ===
    pub use axum::{
        Json, Router,
        routing::{delete, get, post, put},
    };
}
