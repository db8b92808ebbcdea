//! Wire format conversion between snake_case storage and camelCase payloads
//!
//! Database rows and internal models use snake_case field names; the
//! consuming frontend speaks camelCase JSON. This module owns the
//! bidirectional, recursive key renaming so no other layer needs to know
//! both spellings.

use crate::errors::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Converts a single snake_case key to camelCase.
///
/// Only an underscore followed by an ASCII lowercase letter is collapsed;
/// anything else (digits, doubled underscores) passes through unchanged.
#[must_use]
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_'
            && let Some(&next) = chars.peek()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts a single camelCase key to snake_case.
#[must_use]
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn convert_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (rename(&key), convert_keys(inner, rename)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_keys(item, rename))
                .collect(),
        ),
        other => other,
    }
}

/// Renames every object key in a JSON tree to camelCase, recursing through
/// nested objects and arrays. Values are never touched.
#[must_use]
pub fn keys_to_camel(value: Value) -> Value {
    convert_keys(value, snake_to_camel)
}

/// Renames every object key in a JSON tree to snake_case, recursing through
/// nested objects and arrays. Values are never touched.
#[must_use]
pub fn keys_to_snake(value: Value) -> Value {
    convert_keys(value, camel_to_snake)
}

/// Serializes a model into a camelCase JSON value for the outside world.
pub fn to_wire<T: Serialize>(value: &T) -> Result<Value> {
    Ok(keys_to_camel(serde_json::to_value(value)?))
}

/// Deserializes a camelCase JSON value back into an internal model.
///
/// # Errors
/// Returns an error when the payload does not match the target shape after
/// key renaming, so unknown-shape input is rejected at this boundary.
pub fn from_wire<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(keys_to_snake(value)).map_err(Into::into)
}
