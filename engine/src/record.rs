//! Record shapes.
//!
//! Both shapes are plain JSON objects; only the keys differ. A [`RawRecord`]
//! is keyed by internal keys as written to disk, an [`ExternalRecord`] by the
//! field names callers use.

use serde_json::{Map, Value};

/// A record as stored on disk, keyed by the schema's internal keys.
pub type RawRecord = Map<String, Value>;

/// A record as seen by callers, keyed by field name.
pub type ExternalRecord = Map<String, Value>;

/// Loose truthiness: `null`, `false`, zero and the empty string are falsy,
/// everything else is truthy (empty arrays and objects included).
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Shallow merge: every key of `patch` overwrites the same key in `base`.
pub fn merge(base: &RawRecord, patch: RawRecord) -> RawRecord {
    let mut merged = base.clone();
    for (key, value) in patch {
        merged.insert(key, value);
    }
    merged
}
