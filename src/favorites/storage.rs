//! Key-value storage bindings for persisted state.
//!
//! Storage is byte oriented and keyed by short strings, the same contract a
//! mobile async-storage binding offers. [`FileStorage`] keeps one file per
//! key under a data directory; [`MemoryStorage`] is a process-local map.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove key '{key}': {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Byte-oriented key-value storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn set_item(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one file per key inside `dir`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the default location (user data directory).
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local"))
            .join("tunescout");
        Self::new(dir)
    }

    /// Root directory of this storage.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key. Keys are percent-encoded so any string is a
    /// valid file name.
    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.item_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write atomically (write to temp, then rename)
        let path = self.item_path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(write_err)?;
        fs::rename(&temp_path, &path).map_err(write_err)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory storage.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.get_item("primary").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("primary", b"{\"version\":1}").unwrap();
        assert_eq!(
            storage.get_item("primary").unwrap().as_deref(),
            Some(&b"{\"version\":1}"[..])
        );

        storage.set_item("primary", b"overwritten").unwrap();
        assert_eq!(
            storage.get_item("primary").unwrap().as_deref(),
            Some(&b"overwritten"[..])
        );

        storage.remove_item("primary").unwrap();
        assert!(storage.get_item("primary").unwrap().is_none());
        // Removing again is fine
        storage.remove_item("primary").unwrap();
    }

    #[test]
    fn test_file_storage_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set_item("primary", b"data").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["primary.json"]);
    }

    #[test]
    fn test_file_storage_encodes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set_item("../escape", b"x").unwrap();

        assert!(dir.path().join("..%2Fescape.json").exists());
        assert_eq!(storage.get_item("../escape").unwrap().as_deref(), Some(&b"x"[..]));
    }

    #[test]
    fn test_file_storage_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"").unwrap();

        let storage = FileStorage::new(&blocker);
        let err = storage.set_item("primary", b"x").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(err.to_string().contains("primary"));
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("k").unwrap().is_none());
        storage.set_item("k", b"v").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some(b"v".to_vec()));
        storage.remove_item("k").unwrap();
        assert!(storage.get_item("k").unwrap().is_none());
    }
}
