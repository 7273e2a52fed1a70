//! Whole-file reads and writes, plus the advisory lock used in exclusive mode.

use crate::{error::Result, StoreFile};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read and parse the whole store file.
pub(crate) fn load(path: &Path) -> Result<StoreFile> {
    let json = fs::read_to_string(path)?;
    StoreFile::from_json(&json)
}

/// Serialize and write the whole store file.
///
/// With `atomic` set the document goes to a uniquely named temp file in the
/// same directory, is fsynced, and is then renamed over `path`. The temp file
/// is removed if any step before the rename fails. Otherwise `path` is
/// truncated and rewritten in place.
pub(crate) fn save(path: &Path, file: &StoreFile, atomic: bool) -> Result<()> {
    let json = file.to_json_pretty()?;
    if !atomic {
        fs::write(path, json)?;
        return Ok(());
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    if let Err(err) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::warn!(dir = %dir.display(), error = %err, "directory fsync after rename failed");
    }
    Ok(())
}

/// `path` with `suffix` appended to its file name.
pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Exclusive advisory lock on `<store file>.lock`, released on drop.
#[derive(Debug)]
pub(crate) struct FileLock {
    file: File,
}

impl FileLock {
    /// Block until the lock for `path` is held.
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(sibling(path, ".lock"))?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
