//! Typed schemas backed by serde and the `validator` derive
//!
//! [`TypedSchema<T>`] adapts any deserializable type with derive-based
//! validation rules to the dynamic [`Schema`] contract, so typed request
//! shapes and [`ObjectSchema`](super::ObjectSchema)s can sit on the same
//! route configuration.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use validator::{Validate, ValidationErrors};

use crate::core::schema::{Issue, Schema, SchemaError};

/// Adapter implementing [`Schema`] for a `Deserialize + Validate` type.
///
/// Validation deserializes the input into `T`, runs the derive rules, and
/// serializes the result back, so downstream consumers still see a JSON
/// value shaped exactly like `T`.
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize + Validate + Send + Sync,
{
    fn validate(&self, input: Value) -> Result<Value, SchemaError> {
        let typed: T = serde_json::from_value(input).map_err(|err| {
            SchemaError::Invalid(vec![Issue::root("invalid_type", err.to_string())])
        })?;
        typed
            .validate()
            .map_err(|errors| SchemaError::Invalid(issues_from(errors)))?;
        serde_json::to_value(&typed).map_err(|err| SchemaError::Internal(err.into()))
    }
}

/// Flatten derive-produced errors into the crate's issue format.
///
/// The derive reports per-field errors in hash order; issues are sorted by
/// path so clients see a stable list.
pub(crate) fn issues_from(errors: ValidationErrors) -> Vec<Issue> {
    let mut issues: Vec<Issue> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("field '{}' is invalid ({})", field, err.code));
                Issue::new([field.to_string()], err.code.to_string(), message)
            })
        })
        .collect();
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}
