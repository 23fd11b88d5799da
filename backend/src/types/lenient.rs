//! Forgiving field decoding for client payloads

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes an optional string field, treating any other JSON type as absent
///
/// A wrongly typed field then fails the same validation as a missing one
/// instead of rejecting the whole payload.
///
/// # Errors
///
/// Only when the underlying input is not valid JSON
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}
