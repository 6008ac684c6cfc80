//! JSON argument parsing helpers for tool implementations.
//!
//! ```rust
//! use ctooling::{parse_object, required_string};
//!
//! let args = parse_object(r#"{"query":"rust"}"#).expect("object should parse");
//! let query = required_string(&args, "query").expect("query should be present");
//! assert_eq!(query, "rust");
//! ```

use serde_json::{Map, Value};

use crate::ToolError;

pub fn parse_object(args_json: &str) -> Result<Map<String, Value>, ToolError> {
    let value: Value = serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))?;

    value
        .as_object()
        .cloned()
        .ok_or_else(|| ToolError::invalid_arguments("expected a JSON object of arguments"))
}

pub fn required_string(args: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required string: '{key}'")))
}

pub fn optional_string(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Reads an optional count argument, coercing string digits the way models
/// frequently emit them (`"3"` instead of `3`).
pub fn optional_count(args: &Map<String, Value>, key: &str, default: usize) -> usize {
    match args.get(key) {
        Some(Value::Number(number)) => number
            .as_u64()
            .map(|value| value as usize)
            .unwrap_or(default),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(default),
        _ => default,
    }
}
