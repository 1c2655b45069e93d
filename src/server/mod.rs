//! Axum integration: the route-wrapping layer and request extractors

pub mod extract;
pub mod layer;

pub use extract::{Parsed, ValidatedQuery, validated_query};
pub use layer::{ValidateLayer, ValidateService};
