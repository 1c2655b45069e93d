//! Reusable field validators
//!
//! Each constructor returns a closure checking one property of a field
//! value. Type validators (`string`, `boolean`, ...) fail on a type
//! mismatch; range and format validators let values of other types pass
//! through, leaving the mismatch to the type validator paired with them.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

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

/// Validator: value must be a string
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(format!(
                "field '{}' must be a string (got {})",
                field,
                type_name(value)
            ))
        }
    }
}

/// Validator: value must be a boolean
pub fn boolean() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(format!(
                "field '{}' must be a boolean (got {})",
                field,
                type_name(value)
            ))
        }
    }
}

/// Validator: value must be an integer
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.as_i64().is_some() {
            Ok(())
        } else {
            Err(format!(
                "field '{}' must be an integer (got {})",
                field,
                type_name(value)
            ))
        }
    }
}

/// Validator: value must be a number
pub fn number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_number() {
            Ok(())
        } else {
            Err(format!(
                "field '{}' must be a number (got {})",
                field,
                type_name(value)
            ))
        }
    }
}

/// Validator: number must be positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num <= 0.0 {
                Err(format!(
                    "field '{}' must be positive (value: {})",
                    field, num
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                Err(format!(
                    "field '{}' must have at least {} characters (currently: {})",
                    field, min, len
                ))
            } else if len > max {
                Err(format!(
                    "field '{}' must not exceed {} characters (currently: {})",
                    field, max, len
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num > max {
                Err(format!(
                    "field '{}' must not exceed {} (value: {})",
                    field, max, num
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.iter().any(|a| a == s) {
                Err(format!(
                    "field '{}' must be one of {:?} (value: {})",
                    field, allowed, s
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must match a pattern
pub fn pattern(regex: Regex) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !regex.is_match(s) {
                Err(format!(
                    "field '{}' must match pattern {} (value: {})",
                    field,
                    regex.as_str(),
                    s
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be an email address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let regex = EMAIL_REGEX.get_or_init(|| {
                Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
            });
            if !regex.is_match(s) {
                Err(format!("field '{}' must be an email address", field))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: date must match format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            match chrono::NaiveDate::parse_from_str(s, format) {
                Ok(_) => Ok(()),
                Err(_) => Err(format!(
                    "field '{}' must be a date in format {} (value: {})",
                    field, format, s
                )),
            }
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === string() ===

    #[test]
    fn test_string_accepts_string() {
        let v = string();
        assert!(v("name", &json!("hello")).is_ok());
        assert!(v("name", &json!("")).is_ok());
    }

    #[test]
    fn test_string_rejects_other_types() {
        let v = string();
        let result = v("name", &json!(42));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("got number"));
        assert!(v("name", &json!(true)).is_err());
    }

    // === boolean() ===

    #[test]
    fn test_boolean_accepts_bools() {
        let v = boolean();
        assert!(v("flag", &json!(true)).is_ok());
        assert!(v("flag", &json!(false)).is_ok());
    }

    #[test]
    fn test_boolean_rejects_strings() {
        let v = boolean();
        let result = v("flag", &json!("true"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("got string"));
    }

    // === integer() ===

    #[test]
    fn test_integer_accepts_integers() {
        let v = integer();
        assert!(v("count", &json!(0)).is_ok());
        assert!(v("count", &json!(-3)).is_ok());
    }

    #[test]
    fn test_integer_rejects_floats_and_strings() {
        let v = integer();
        assert!(v("count", &json!(1.5)).is_err());
        assert!(v("count", &json!("2")).is_err());
    }

    // === number() ===

    #[test]
    fn test_number_accepts_floats_and_integers() {
        let v = number();
        assert!(v("price", &json!(1.5)).is_ok());
        assert!(v("price", &json!(2)).is_ok());
    }

    #[test]
    fn test_number_rejects_strings() {
        let v = number();
        assert!(v("price", &json!("1.5")).is_err());
    }

    // === positive() ===

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        let v = positive();
        assert!(v("price", &json!(0.0)).is_err());
        assert!(v("price", &json!(-5)).is_err());
    }

    #[test]
    fn test_positive_accepts_positive_and_passes_non_numbers() {
        let v = positive();
        assert!(v("price", &json!(42.5)).is_ok());
        assert!(v("name", &json!("hello")).is_ok());
    }

    // === string_length() ===

    #[test]
    fn test_string_length_bounds() {
        let v = string_length(3, 5);
        assert!(v("name", &json!("ab")).is_err());
        assert!(v("name", &json!("abc")).is_ok());
        assert!(v("name", &json!("abcde")).is_ok());
        assert!(v("name", &json!("abcdef")).is_err());
    }

    #[test]
    fn test_string_length_counts_chars_not_bytes() {
        let v = string_length(1, 3);
        assert!(v("name", &json!("héé")).is_ok());
    }

    #[test]
    fn test_string_length_non_string_passthrough() {
        let v = string_length(5, 10);
        assert!(v("age", &json!(42)).is_ok());
    }

    // === max_value() ===

    #[test]
    fn test_max_value_bounds() {
        let v = max_value(100.0);
        assert!(v("score", &json!(100.0)).is_ok());
        assert!(v("score", &json!(101.0)).is_err());
        assert!(v("name", &json!("hello")).is_ok());
    }

    // === in_list() ===

    #[test]
    fn test_in_list_membership() {
        let v = in_list(vec!["active".into(), "inactive".into()]);
        assert!(v("status", &json!("active")).is_ok());
        assert!(v("status", &json!("deleted")).is_err());
        assert!(v("flag", &json!(42)).is_ok());
    }

    // === pattern() ===

    #[test]
    fn test_pattern_matching() {
        let v = pattern(Regex::new(r"^[a-z]+-\d+$").unwrap());
        assert!(v("sku", &json!("item-42")).is_ok());
        assert!(v("sku", &json!("ITEM 42")).is_err());
        assert!(v("sku", &json!(7)).is_ok());
    }

    // === email() ===

    #[test]
    fn test_email_format() {
        let v = email();
        assert!(v("email", &json!("john@example.com")).is_ok());
        assert!(v("email", &json!("not-an-email")).is_err());
    }

    // === date_format() ===

    #[test]
    fn test_date_format_valid_and_invalid() {
        let v = date_format("%Y-%m-%d");
        assert!(v("birthday", &json!("2024-01-15")).is_ok());
        assert!(v("birthday", &json!("15/01/2024")).is_err());
        assert!(v("birthday", &json!(12345)).is_ok());
    }
}
