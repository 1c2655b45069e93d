//! Query-string decoding
//!
//! Decodes a raw query string into the JSON object the query schema sees.
//! Semantics follow the usual web-framework query parser: a bare key
//! (`?flag`) decodes to the empty string, repeated keys collect into an
//! array, `+` and percent-escapes are resolved.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Decode a raw query string (without the leading `?`) into a JSON object.
pub fn query_to_value(query: &str) -> Value {
    let mut map = Map::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let key = key.into_owned();
        let value = Value::String(value.into_owned());
        match map.get_mut(&key) {
            None => {
                map.insert(key, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    Value::Object(map)
}
