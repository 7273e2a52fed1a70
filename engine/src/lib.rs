//! # FileDB Engine
//!
//! A record store backed by a single JSON file.
//!
//! The file holds an id counter, a schema mapping and every record. Each
//! operation reads the whole file, changes it in memory and writes the whole
//! file back, so a store handle carries no state besides its path.
//!
//! ## Core Concepts
//!
//! ### Schema
//!
//! A [`SchemaMap`] maps the field names callers use (`"name"`) to the compact
//! internal keys records are stored under (`1`). It is written into the file
//! when the file is created and read back from the file on every operation.
//!
//! ### Records
//!
//! - [`ExternalRecord`] - keyed by field name, returned by reads
//! - [`RawRecord`] - keyed by internal key, as stored and as returned by
//!   [`RecordStore::create`] and [`RecordStore::update`]
//!
//! Ids come from a counter that only grows, so deleted ids are never handed
//! out again.
//!
//! ### Concurrency
//!
//! By default there is no locking and writes happen in place: two writers on
//! the same file race and the last one wins. [`StoreOptions`] enables atomic
//! temp-file-and-rename writes and an exclusive advisory lock per operation.
//!
//! ## Quick Start
//!
//! ```rust
//! use filedb_engine::{RecordStore, SchemaMap};
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let schema = SchemaMap::new()
//!     .with_field("id", 0)
//!     .with_field("name", 1)
//!     .with_field("email", 2);
//!
//! let store = RecordStore::open(dir.path().join("users.json"), schema).unwrap();
//!
//! let fields = json!({"name": "Alice", "email": "alice@example.com"});
//! let created = store.create(fields.as_object().unwrap()).unwrap();
//! assert_eq!(created["0"], 0);
//!
//! let alice = store.find_one("0").unwrap();
//! assert_eq!(alice["name"], "Alice");
//! assert_eq!(store.find_many().unwrap().len(), 1);
//! ```

pub mod error;
pub mod file;
mod persist;
pub mod record;
pub mod schema;
pub mod store;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use file::StoreFile;
pub use record::{ExternalRecord, RawRecord};
pub use schema::{InternalKey, SchemaMap};
pub use store::{RecordStore, StoreOptions};

/// Type aliases for clarity
pub type RecordId = String;
pub type FieldName = String;

/// Name of the identifier field in a schema.
pub const ID_FIELD: &str = "id";
