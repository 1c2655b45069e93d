//! Declarative object schemas: per-field validators and transforms
//!
//! An [`ObjectSchema`] validates a JSON object field by field. Fields are
//! checked in declaration order and issues are aggregated across fields, so
//! a client sees everything wrong with one source at once. Unknown fields
//! are stripped from the output; transforms only run once the whole object
//! validated cleanly.
//!
//! ```rust,ignore
//! let schema = ObjectSchema::new()
//!     .field("email", FieldRule::required().check(validators::email()).map(transforms::lowercase()))
//!     .field("page", FieldRule::optional().check(validators::string()).map(transforms::to_integer()));
//! ```

pub mod transforms;
pub mod typed;
pub mod validators;

pub use typed::TypedSchema;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::core::schema::{Issue, Schema, SchemaError};

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Transform = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Validation and transformation rules for a single field
pub struct FieldRule {
    required: bool,
    validators: Vec<Validator>,
    transforms: Vec<Transform>,
}

impl FieldRule {
    /// A field that must be present and non-null
    pub fn required() -> Self {
        Self {
            required: true,
            validators: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// A field that may be absent; rules apply only when it is present
    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::required()
        }
    }

    /// Add a validator (see [`validators`])
    pub fn check(
        mut self,
        validator: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Add a transform (see [`transforms`]); transforms run in order
    pub fn map(
        mut self,
        transform: impl Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }
}

/// An ordered set of field rules validating a JSON object
#[derive(Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, FieldRule>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field; declaration order is the validation (and issue) order
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, input: Value) -> Result<Value, SchemaError> {
        // A null input (e.g. an absent body) behaves like an empty object so
        // each required field reports its own issue.
        let map = match input {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(SchemaError::Invalid(vec![Issue::root(
                    "invalid_type",
                    format!("expected object, got {}", type_name(&other)),
                )]));
            }
        };

        let mut issues = Vec::new();
        for (name, rule) in &self.fields {
            match map.get(name.as_str()).filter(|v| !v.is_null()) {
                None => {
                    if rule.required {
                        issues.push(Issue::new(
                            [name.clone()],
                            "required",
                            format!("field '{}' is required", name),
                        ));
                    }
                }
                Some(value) => {
                    for validator in &rule.validators {
                        if let Err(message) = validator(name, value) {
                            issues.push(Issue::new([name.clone()], "invalid", message));
                        }
                    }
                }
            }
        }
        if !issues.is_empty() {
            return Err(SchemaError::Invalid(issues));
        }

        let mut output = Map::new();
        for (name, rule) in &self.fields {
            if let Some(value) = map.get(name.as_str()).filter(|v| !v.is_null()) {
                let mut value = value.clone();
                for transform in &rule.transforms {
                    value = transform(name, value).map_err(SchemaError::Internal)?;
                }
                output.insert(name.clone(), value);
            }
        }
        Ok(Value::Object(output))
    }
}
