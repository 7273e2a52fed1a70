//! The on-disk document.
//!
//! A store file is one pretty-printed JSON object:
//!
//! ```json
//! {
//!   "idNum": 2,
//!   "metadata": { "id": 0, "name": 1 },
//!   "data": {
//!     "0": { "0": 0, "1": "Alice" },
//!     "1": { "0": 1, "1": "Bob" }
//!   }
//! }
//! ```

use crate::{error::Result, Error, RawRecord, SchemaMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete store state: id counter, schema and all records.
///
/// Records are keyed by numeric id so iteration is in ascending id order;
/// serde_json writes the keys as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreFile {
    /// Next id to assign. Never decremented, so ids are never reused.
    #[serde(rename = "idNum")]
    pub next_id: u64,
    /// Field name to internal key mapping, persisted verbatim
    #[serde(rename = "metadata")]
    pub schema: SchemaMap,
    /// Records by id
    #[serde(rename = "data")]
    pub records: BTreeMap<u64, RawRecord>,
}

impl StoreFile {
    /// Create an empty store document for a schema.
    pub fn new(schema: SchemaMap) -> Self {
        Self {
            next_id: 0,
            schema,
            records: BTreeMap::new(),
        }
    }

    /// Look up a record by its string id.
    pub fn get(&self, id: &str) -> Option<&RawRecord> {
        self.records.get(&parse_record_id(id)?)
    }

    /// Insert a record under the next id and advance the counter.
    ///
    /// Fails without inserting when the counter cannot advance.
    pub fn push(&mut self, record: RawRecord) -> Result<u64> {
        let id = self.next_id;
        let next = id.checked_add(1).ok_or(Error::IdsExhausted(id))?;
        self.records.insert(id, record);
        self.next_id = next;
        Ok(id)
    }

    /// Replace the record stored under an existing id.
    pub fn replace(&mut self, id: &str, record: RawRecord) -> Option<RawRecord> {
        let slot = self.records.get_mut(&parse_record_id(id)?)?;
        Some(std::mem::replace(slot, record))
    }

    /// Remove a record, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<RawRecord> {
        self.records.remove(&parse_record_id(id)?)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse a record id as stored in the file.
///
/// Only the canonical decimal form matches: `"01"`, `"+1"` and `" 1"` are not
/// ids of any stored record.
pub fn parse_record_id(id: &str) -> Option<u64> {
    let n: u64 = id.parse().ok()?;
    (n.to_string() == id).then_some(n)
}
