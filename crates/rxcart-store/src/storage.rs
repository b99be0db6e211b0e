//! # Key-Value Storage
//!
//! The cart snapshot lives in a string-keyed, string-valued store, the same
//! shape as the browser's local storage.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStorage                                     │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌──────────────────────────────────┐   │
//! │  │   MemoryStorage     │        │   FileStorage                    │   │
//! │  │  HashMap in Mutex   │        │  <dir>/<key>.json per key        │   │
//! │  │  tests, previews    │        │  survives restarts               │   │
//! │  └─────────────────────┘        └──────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Removing a key that does not exist is not an error for any backend.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::trace;

use crate::error::{StorageError, StorageResult};

/// A string-keyed store of string values.
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value at `key`, `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Absent keys are fine.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Rejects keys that cannot double as file names.
///
/// ## Rules
/// - Not empty
/// - ASCII letters, digits, `-` and `_` only
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries().map(|e| e.contains_key(key)).unwrap_or(false)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir`, which is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// The directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        trace!(?path, bytes = value.len(), "Storage key written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cartItems").is_ok());
        assert!(validate_key("cart_items-v2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("cart items").is_err());
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "[1]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1]"));
        assert!(storage.contains("k"));

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(!storage.contains("k"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("cartItems").unwrap(), None);

        storage.set("cartItems", "[]").unwrap();
        assert!(dir.path().join("nested/cartItems.json").exists());
        assert_eq!(storage.get("cartItems").unwrap().as_deref(), Some("[]"));

        storage.set("cartItems", "[{}]").unwrap();
        assert_eq!(storage.get("cartItems").unwrap().as_deref(), Some("[{}]"));
        assert!(!dir.path().join("nested/cartItems.json.tmp").exists());

        storage.remove("cartItems").unwrap();
        assert_eq!(storage.get("cartItems").unwrap(), None);
        storage.remove("cartItems").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
