//! Durable key-value slots holding serialized queue state
//!
//! The pending queue only needs synchronous `get` and `put` on a single key, so
//! the backends are deliberately small. The file backend writes through a temp
//! file, fsyncs it and renames it over the destination so a crash never leaves a
//! half-written value behind.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{StorageError, StorageResult};

/// Synchronous storage for string values addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`
    ///
    /// Implementations must not return until the value is durable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// File-backed store keeping one file per key inside a namespace directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Opens (creating if needed) the namespace directory under `dir`
    ///
    /// # Arguments
    ///
    /// * `dir` - Base directory for all namespaces
    /// * `namespace` - Namespace name, used as a directory name
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidSlotName` if the namespace is not a plain
    /// file name, or `StorageError::Io` if the directory cannot be created
    pub fn open(dir: impl AsRef<Path>, namespace: &str) -> StorageResult<Self> {
        validate_slot_name(namespace)?;
        let root = dir.as_ref().join(namespace);
        fs::create_dir_all(&root).map_err(|e| StorageError::io(&root, e))?;

        tracing::debug!("Opened key-value namespace at {}", root.display());
        Ok(Self { root })
    }

    /// Directory holding this namespace's files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_slot_name(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read(&path) {
            // Invalid UTF-8 is surfaced as text so the caller's parser can
            // reject it like any other corrupt value.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        let tmp_path = path.with_extension("json.tmp");

        {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)
                .map_err(|e| StorageError::io(&tmp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| StorageError::io(&tmp_path, e))?;
            file.sync_all()
                .map_err(|e| StorageError::io(&tmp_path, e))?;
        }

        fs::rename(&tmp_path, &path).map_err(|e| StorageError::io(&path, e))?;

        // Persist the rename itself; not every platform allows opening a directory.
        if let Ok(dir) = File::open(&self.root) {
            let _ = dir.sync_all();
        }

        Ok(())
    }
}

/// In-process store, durable only for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Namespaces and keys become path components, so they must be plain names
fn validate_slot_name(name: &str) -> StorageResult<()> {
    let is_plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);

    if is_plain {
        Ok(())
    } else {
        Err(StorageError::InvalidSlotName(name.to_string()))
    }
}
