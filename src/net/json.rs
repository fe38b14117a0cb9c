//! JSON lookup utilities for loosely shaped catalog payloads.
//!
//! The catalog returns book entries whose fields appear under different names
//! depending on the record's age (`cover_image` vs `coverImage`,
//! `details.price` vs `price`, ...). These helpers navigate nested objects
//! with dot notation and resolve a list of alias paths in order.
//!
//! # Examples
//!
//! ```rust
//! use pustaka::net::json;
//! use serde_json::json;
//!
//! let data = json!({
//!     "details": { "price": "" },
//!     "price": 75000
//! });
//!
//! assert_eq!(json::first_text(&data, &["details.price", "price"]).as_deref(), Some("75000"));
//! assert_eq!(json::extract_path(&data, "details.isbn"), None);
//! ```

use serde_json::Value;

/// Looks up a value in nested JSON using dot notation.
///
/// Returns `None` if any segment of the path is missing.
///
/// ```rust
/// use pustaka::net::json;
/// use serde_json::json;
///
/// let data = json!({ "author": { "name": "Andrea Hirata" } });
/// let name = json::extract_path(&data, "author.name");
/// assert_eq!(name.and_then(|v| v.as_str()), Some("Andrea Hirata"));
/// ```
pub fn extract_path<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = json;

    for key in path.split('.') {
        current = current.get(key)?;
    }

    Some(current)
}

/// Renders a scalar as display text.
///
/// Strings are returned as-is and numbers in their shortest form. Everything
/// else (null, booleans, arrays, objects) has no text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty text at `path`, if any.
pub fn text_at(json: &Value, path: &str) -> Option<String> {
    extract_path(json, path)
        .and_then(as_text)
        .filter(|text| !text.is_empty())
}

/// The first non-empty text found along `paths`, tried in order.
pub fn first_text(json: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| text_at(json, path))
}

/// A positive number at `path`. Zero, negative, and non-numeric values count
/// as absent.
pub fn positive_number_at(json: &Value, path: &str) -> Option<f64> {
    extract_path(json, path)
        .and_then(Value::as_f64)
        .filter(|n| *n > 0.0)
}

/// Returns the array at `path`, or `None` if the value is missing or not an
/// array.
pub fn array_at<'a>(json: &'a Value, path: &str) -> Option<&'a Vec<Value>> {
    extract_path(json, path).and_then(Value::as_array)
}
