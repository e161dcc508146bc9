//! Defensive accessors for loosely shaped JSON responses.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Walk a dotted path (`"products.results"`, `"images.0.url"`) through a JSON value.
///
/// Numeric segments index into arrays. Returns `None` as soon as a segment is
/// missing or the value at that point cannot be descended into.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Read a typed value at `path`, returning `fallback` when the path is missing,
/// `null`, or holds a value of the wrong shape.
pub fn get_value<T: DeserializeOwned>(value: &Value, path: &str, fallback: T) -> T {
    match lookup(value, path) {
        None | Some(Value::Null) => fallback,
        Some(found) => T::deserialize(found).unwrap_or(fallback),
    }
}

/// Like [`get_value`] but renders scalars as text, the way a table cell would.
pub fn get_text(value: &Value, path: &str, fallback: &str) -> String {
    match lookup(value, path) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => fallback.to_string(),
    }
}
