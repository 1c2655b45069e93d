//! Reusable field transforms
//!
//! Transforms run after a field's validators passed and shape the value the
//! handler ultimately receives. Coercing transforms (`to_boolean`,
//! `to_integer`, ...) exist mainly for query parameters, which always arrive
//! as strings. Non-matching types pass through unchanged.

use anyhow::{Context, Result};
use serde_json::{Value, json};

/// Transform: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Transform: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_lowercase()))
        } else {
            Ok(value)
        }
    }
}

/// Transform: convert string to uppercase
pub fn uppercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_uppercase()))
        } else {
            Ok(value)
        }
    }
}

/// Transform: coerce a string to a boolean.
///
/// Empty strings, `"false"` and `"0"` coerce to `false`; any other string is
/// `true`.
pub fn to_boolean() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            let coerced = !(s.is_empty() || s.eq_ignore_ascii_case("false") || s == "0");
            Ok(Value::Bool(coerced))
        } else {
            Ok(value)
        }
    }
}

/// Transform: parse a string into an integer.
///
/// Parse failures are schema faults, not client errors; pair with a
/// validator that guarantees the shape first.
pub fn to_integer() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        if let Some(s) = value.as_str() {
            let parsed: i64 = s
                .trim()
                .parse()
                .with_context(|| format!("field '{}' is not an integer: {:?}", field, s))?;
            Ok(json!(parsed))
        } else {
            Ok(value)
        }
    }
}

/// Transform: parse a string into a number
pub fn to_number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        if let Some(s) = value.as_str() {
            let parsed: f64 = s
                .trim()
                .parse()
                .with_context(|| format!("field '{}' is not a number: {:?}", field, s))?;
            Ok(json!(parsed))
        } else {
            Ok(value)
        }
    }
}

/// Transform: round number to specified decimal places
pub fn round_decimals(
    decimals: u32,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| {
        if let Some(num) = value.as_f64() {
            let factor = 10_f64.powi(decimals as i32);
            let rounded = (num * factor).round() / factor;
            Ok(json!(rounded))
        } else {
            Ok(value)
        }
    }
}
