//! Helpers for the loosely typed JSON the backend stores.

use serde_json::Value;

/// Render a JSON value as the plain text a prompt would receive.
///
/// Strings are returned without quotes, `null` becomes the empty string and
/// every other value uses its compact JSON form.
///
/// # Examples
///
/// ```
/// use sequin_core::value_to_text;
/// use serde_json::json;
///
/// assert_eq!(value_to_text(&json!("abc")), "abc");
/// assert_eq!(value_to_text(&json!(3)), "3");
/// assert_eq!(value_to_text(&json!(null)), "");
/// ```
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a `*_json` column that may hold structured JSON or JSON text.
///
/// Returns `None` for `null`, for empty strings and for strings that do
/// not parse.
pub fn decode_embedded_json(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Null) => None,
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring undecodable embedded JSON");
                    None
                }
            }
        }
        other => Some(other.clone()),
    }
}
