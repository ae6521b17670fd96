//! Record shape normalization.
//!
//! Records coming from a document-database back-end carry their key in an
//! `_id` field, sometimes wrapped as `{"$oid": "..."}`. The public shape uses
//! a plain string `id`. These helpers work on `serde_json::Value` so they
//! apply before a record is typed.

use serde_json::{Map, Value};

/// Rename `_id` to a string `id` on an object, or on every object in an array.
///
/// Values that are neither objects nor arrays, and objects without `_id`,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use itemdeck_core::normalize_record;
/// use serde_json::json;
///
/// let doc = json!({"_id": {"$oid": "507f1f77bcf86cd799439011"}, "name": "Lamp"});
/// assert_eq!(
///     normalize_record(doc),
///     json!({"id": "507f1f77bcf86cd799439011", "name": "Lamp"})
/// );
/// ```
pub fn normalize_record(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_record).collect()),
        Value::Object(map) => Value::Object(normalize_object(map)),
        other => other,
    }
}

fn normalize_object(mut map: Map<String, Value>) -> Map<String, Value> {
    if let Some(raw) = map.remove("_id") {
        map.insert("id".to_string(), Value::String(id_to_string(raw)));
    }
    map
}

fn id_to_string(raw: Value) -> String {
    match raw {
        Value::String(s) => s,
        Value::Object(mut inner) => match inner.remove("$oid") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => Value::Object(inner).to_string(),
        },
        other => other.to_string(),
    }
}
