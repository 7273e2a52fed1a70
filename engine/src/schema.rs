//! Schema mapping between external field names and internal record keys.
//!
//! Records are stored compacted: instead of `{"name": "Alice"}` the file holds
//! `{"1": "Alice"}`. The [`SchemaMap`] owns that renaming and is the only thing
//! that knows how to move a record between the two shapes.

use crate::record::{is_truthy, ExternalRecord, RawRecord};
use crate::{FieldName, ID_FIELD};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Internal storage key a field is compacted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InternalKey {
    /// Positional key, e.g. `1`
    Number(Number),
    /// Named key, e.g. `"n"`
    Name(String),
}

impl InternalKey {
    /// The key as it appears inside a stored record object.
    pub fn slot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InternalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalKey::Number(n) => write!(f, "{}", n),
            InternalKey::Name(s) => f.write_str(s),
        }
    }
}

impl From<u64> for InternalKey {
    fn from(n: u64) -> Self {
        InternalKey::Number(n.into())
    }
}

impl From<i64> for InternalKey {
    fn from(n: i64) -> Self {
        InternalKey::Number(n.into())
    }
}

impl From<i32> for InternalKey {
    fn from(n: i32) -> Self {
        InternalKey::Number(n.into())
    }
}

impl From<&str> for InternalKey {
    fn from(s: &str) -> Self {
        InternalKey::Name(s.to_string())
    }
}

impl From<String> for InternalKey {
    fn from(s: String) -> Self {
        InternalKey::Name(s)
    }
}

/// Ordered mapping from external field name to internal key.
///
/// Declaration order is kept; it drives the key order of projected records
/// and of the `metadata` object on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMap {
    fields: Vec<(FieldName, InternalKey)>,
}

impl SchemaMap {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add or replace a field mapping. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<FieldName>, key: impl Into<InternalKey>) -> &mut Self {
        let name = name.into();
        let key = key.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = key,
            None => self.fields.push((name, key)),
        }
        self
    }

    /// Builder-style method to add a field mapping.
    pub fn with_field(mut self, name: impl Into<FieldName>, key: impl Into<InternalKey>) -> Self {
        self.insert(name, key);
        self
    }

    /// Internal key for an external field name.
    pub fn get(&self, name: &str) -> Option<&InternalKey> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, k)| k)
    }

    /// Internal key of the identifier field, if the schema declares one.
    pub fn id_key(&self) -> Option<&InternalKey> {
        self.get(ID_FIELD)
    }

    /// Iterate mappings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &InternalKey)> {
        self.fields.iter().map(|(n, k)| (n, k))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Project a stored record to external field names.
    ///
    /// Fields whose internal slot is missing from the record are left out.
    pub fn to_external(&self, raw: &RawRecord) -> ExternalRecord {
        let mut out = ExternalRecord::new();
        for (name, key) in self.iter() {
            if let Some(value) = raw.get(&key.slot()) {
                out.insert(name.clone(), value.clone());
            }
        }
        out
    }

    /// Write projection used by updates.
    ///
    /// The identifier field is never written, and fields absent from `fields`
    /// are skipped. An explicit `null` is present and therefore written.
    pub fn to_internal(&self, fields: &ExternalRecord) -> RawRecord {
        let mut out = RawRecord::new();
        for (name, key) in self.iter() {
            if name == ID_FIELD {
                continue;
            }
            if let Some(value) = fields.get(name) {
                out.insert(key.slot(), value.clone());
            }
        }
        out
    }

    /// Build the stored form of a newly created record.
    ///
    /// The identifier slot gets `next_id` unless the caller passed a truthy
    /// `id`; in that case the slot is filled from the caller's value under the
    /// identifier's *internal* key, and omitted if there is none.
    pub fn to_created(&self, fields: &ExternalRecord, next_id: u64) -> RawRecord {
        let mut out = RawRecord::new();
        for (name, key) in self.iter() {
            let slot = key.slot();
            if name == ID_FIELD {
                let supplied = fields.get(ID_FIELD).is_some_and(is_truthy);
                if !supplied {
                    out.insert(slot, Value::from(next_id));
                } else if let Some(value) = fields.get(&slot) {
                    out.insert(slot, value.clone());
                }
            } else if let Some(value) = fields.get(name) {
                out.insert(slot, value.clone());
            }
        }
        out
    }
}

impl<N: Into<FieldName>, K: Into<InternalKey>> FromIterator<(N, K)> for SchemaMap {
    fn from_iter<I: IntoIterator<Item = (N, K)>>(iter: I) -> Self {
        let mut schema = SchemaMap::new();
        for (name, key) in iter {
            schema.insert(name, key);
        }
        schema
    }
}

impl Serialize for SchemaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, key) in &self.fields {
            map.serialize_entry(name, key)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SchemaMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = SchemaMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping field names to internal keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<SchemaMap, A::Error> {
                let mut schema = SchemaMap::new();
                while let Some((name, key)) = access.next_entry::<String, InternalKey>()? {
                    schema.insert(name, key);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
