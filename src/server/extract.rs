//! Request extractors and the imperative query accessor
//!
//! Three ways for a handler to get at validated data:
//! - [`Parsed`] reads what a [`ValidateLayer`](super::ValidateLayer)-wrapped
//!   route attached to the request.
//! - [`validated_query`] validates the query on the spot, inside the handler
//!   body, against any [`Schema`].
//! - [`ValidatedQuery`] deserializes the query into a typed shape and runs
//!   its derive-based validation rules.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ops::Deref;
use validator::Validate;

use crate::core::error::PreflightError;
use crate::core::query::query_to_value;
use crate::core::schema::{Issue, Schema};
use crate::core::validate::{ParsedData, validate_one};
use crate::schema::typed::issues_from;

/// Validate only the query portion of an in-flight request.
///
/// Returns the transformed query value. The error renders as the same 400
/// response the route wrapper produces, so handlers returning
/// `Result<_, PreflightError>` can bubble it with `?`. Body validation and
/// the request extensions are never touched.
pub fn validated_query<S: Schema>(parts: &Parts, schema: &S) -> Result<Value, PreflightError> {
    let input = query_to_value(parts.uri.query().unwrap_or(""));
    validate_one(schema, input).inspect_err(|err| {
        tracing::debug!(
            path = %parts.uri.path(),
            code = err.error_code(),
            "query rejected"
        );
    })
}

/// Extractor exposing the data a [`ValidateLayer`](super::ValidateLayer)
/// attached to the request.
///
/// Rejects with a 500 (not a 400: this is a wiring mistake, not a client
/// error) when the route was not wrapped.
#[derive(Debug, Clone)]
pub struct Parsed(pub ParsedData);

impl Parsed {
    pub fn into_inner(self) -> ParsedData {
        self.0
    }
}

impl Deref for Parsed {
    type Target = ParsedData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Parsed
where
    S: Send + Sync,
{
    type Rejection = PreflightError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ParsedData>()
            .cloned()
            .map(Parsed)
            .ok_or_else(|| {
                PreflightError::Internal(anyhow::anyhow!(
                    "no parsed data in request extensions; is the route wrapped with ValidateLayer?"
                ))
            })
    }
}

/// Typed query extractor: deserializes the query string into `T` and runs
/// its derive-based validation rules.
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct Pagination {
///     #[validate(range(min = 1, max = 100))]
///     limit: u32,
/// }
///
/// async fn list(ValidatedQuery(page): ValidatedQuery<Pagination>) -> ... {}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> ValidatedQuery<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = PreflightError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                PreflightError::validation(vec![Issue::root("invalid_query", err.body_text())])
            })?;
        value.validate().map_err(|errors| {
            let err = PreflightError::validation(issues_from(errors));
            tracing::debug!(
                path = %parts.uri.path(),
                code = err.error_code(),
                "query rejected"
            );
            err
        })?;
        Ok(ValidatedQuery(value))
    }
}
