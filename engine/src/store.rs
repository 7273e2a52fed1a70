//! RecordStore - CRUD over a single JSON file.
//!
//! Every operation loads the whole file, changes it in memory and writes the
//! whole file back. Nothing is cached between calls.

use crate::persist::{self, FileLock};
use crate::record::{merge, ExternalRecord, RawRecord};
use crate::{error::Result, Error, SchemaMap, StoreFile};
use parking_lot::{Mutex, MutexGuard};
use std::path::{Path, PathBuf};

/// Write and locking behavior for a store.
///
/// The default is the plain mode: in-place rewrites, no locking, last writer
/// wins when two processes share a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Write to a temp file and rename it over the store file
    pub atomic_writes: bool,
    /// Serialize each read-modify-write cycle with an in-process mutex and an
    /// advisory lock on `<file>.lock`
    pub exclusive: bool,
}

impl StoreOptions {
    /// Plain mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic writes and exclusive locking together.
    pub fn hardened() -> Self {
        Self {
            atomic_writes: true,
            exclusive: true,
        }
    }

    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    pub fn exclusive(mut self, enabled: bool) -> Self {
        self.exclusive = enabled;
        self
    }
}

/// Held for the duration of one cycle in exclusive mode.
struct CycleGuard<'a> {
    _local: MutexGuard<'a, ()>,
    _file: FileLock,
}

/// A handle to a store file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    /// Schema given at open; only used to initialize a missing file
    schema: SchemaMap,
    options: StoreOptions,
    cycle: Mutex<()>,
}

impl RecordStore {
    /// Open a store in plain mode. See [`RecordStore::open_with`].
    pub fn open(path: impl AsRef<Path>, schema: SchemaMap) -> Result<Self> {
        Self::open_with(path, schema, StoreOptions::default())
    }

    /// Open a store, creating the file if it does not exist.
    ///
    /// An existing file is left untouched and is not checked against
    /// `schema`: all operations use the schema stored in the file.
    pub fn open_with(path: impl AsRef<Path>, schema: SchemaMap, options: StoreOptions) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            schema,
            options,
            cycle: Mutex::new(()),
        };

        let guard = store.enter()?;
        if !store.path.exists() {
            let initial = StoreFile::new(store.schema.clone());
            persist::save(&store.path, &initial, options.atomic_writes)?;
            tracing::info!(path = %store.path.display(), fields = store.schema.len(), "initialized store file");
        }
        drop(guard);

        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// The schema stored in the file, which may differ from the one passed to
    /// [`RecordStore::open`].
    pub fn stored_schema(&self) -> Result<SchemaMap> {
        self.read(|file| Ok(file.schema.clone()))
    }

    /// Insert a record under the next id.
    ///
    /// Returns the record as stored, keyed by internal keys.
    pub fn create(&self, fields: &ExternalRecord) -> Result<RawRecord> {
        self.modify(|file| {
            let entry = file.schema.to_created(fields, file.next_id);
            let id = file.push(entry.clone())?;
            tracing::debug!(id, next_id = file.next_id, "created record");
            Ok(entry)
        })
    }

    /// All records in ascending id order, keyed by field name.
    pub fn find_many(&self) -> Result<Vec<ExternalRecord>> {
        self.read(|file| {
            let records: Vec<_> = file
                .records
                .values()
                .map(|raw| file.schema.to_external(raw))
                .collect();
            tracing::debug!(count = records.len(), "listed records");
            Ok(records)
        })
    }

    /// One record keyed by field name.
    pub fn find_one(&self, id: &str) -> Result<ExternalRecord> {
        self.read(|file| {
            let raw = file.get(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
            Ok(file.schema.to_external(raw))
        })
    }

    /// Overwrite the given fields of a record.
    ///
    /// The `id` field is ignored. Returns the merged record as stored, keyed
    /// by internal keys.
    pub fn update(&self, id: &str, fields: &ExternalRecord) -> Result<RawRecord> {
        self.modify(|file| {
            let existing = file.get(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
            let patch = file.schema.to_internal(fields);
            let changed = patch.len();
            let merged = merge(existing, patch);
            file.replace(id, merged.clone());
            tracing::debug!(id, changed, "updated record");
            Ok(merged)
        })
    }

    /// Remove a record. Its id is not reused.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.modify(|file| {
            file.remove(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
            tracing::debug!(id, remaining = file.len(), "deleted record");
            Ok(())
        })
    }

    fn enter(&self) -> Result<Option<CycleGuard<'_>>> {
        if !self.options.exclusive {
            return Ok(None);
        }
        let local = self.cycle.lock();
        let file = FileLock::acquire(&self.path)?;
        Ok(Some(CycleGuard {
            _local: local,
            _file: file,
        }))
    }

    fn read<T>(&self, op: impl FnOnce(&StoreFile) -> Result<T>) -> Result<T> {
        let _guard = self.enter()?;
        let file = persist::load(&self.path)?;
        op(&file)
    }

    /// Load, apply `op`, and write back only if `op` succeeded.
    fn modify<T>(&self, op: impl FnOnce(&mut StoreFile) -> Result<T>) -> Result<T> {
        let _guard = self.enter()?;
        let mut file = persist::load(&self.path)?;
        let out = op(&mut file)?;
        persist::save(&self.path, &file, self.options.atomic_writes)?;
        Ok(out)
    }
}
