//! Cleanup of storage-internal notation in server responses.
//!
//! The backend stores its records in a document database and leaks the
//! database's `_id` field into responses. Application code only ever sees
//! `id`.

use serde_json::Value;
use tracing::warn;

const STORAGE_ID: &str = "_id";
const ID: &str = "id";

/// Rename `_id` to `id` in place, recursively through objects and arrays.
///
/// An object that already has an `id` keeps both fields untouched.
pub fn clean_storage_ids(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key(STORAGE_ID) {
                if map.contains_key(ID) {
                    warn!("Object has both {} and {}, keeping {}", STORAGE_ID, ID, ID);
                } else if let Some(storage_id) = map.remove(STORAGE_ID) {
                    map.insert(ID.to_string(), storage_id);
                }
            }

            for member in map.values_mut() {
                clean_storage_ids(member);
            }
        }
        Value::Array(items) => {
            for item in items {
                clean_storage_ids(item);
            }
        }
        _ => {}
    }
}

/// Parse a response body as JSON and clean its storage notation.
pub fn read_storage_response(body: &str) -> Result<Value, serde_json::Error> {
    let mut value: Value = serde_json::from_str(body)?;
    clean_storage_ids(&mut value);
    Ok(value)
}
