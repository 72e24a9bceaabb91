//! Key-value storage providers.
//!
//! Stores persist each of their records as a JSON string under a fixed key.
//! A provider only has to offer get and set by key; no transactions are
//! assumed, and the last write to a key wins.
//!
//! # Providers
//!
//! - [`MemoryStorage`]: process-local map, used for tests and dry runs
//! - [`FileStorage`]: one `<key>.json` file per record in a data directory
//!
//! Front ends may add their own (the CLI ships a SQLite-backed one).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a record.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A durable string-keyed store of string values.
///
/// `set` takes `&self` so one provider can be shared by several stores;
/// implementations use interior mutability where they need it.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_forwards_to_provider() {
        let storage = MemoryStorage::new();
        let by_ref: &dyn KeyValueStorage = &storage;

        by_ref.set("key", "value").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn test_boxed_provider() {
        let storage: Box<dyn KeyValueStorage> = Box::new(MemoryStorage::new());
        assert!(storage.get("missing").unwrap().is_none());

        storage.set("key", "1").unwrap();
        assert_eq!(storage.get("key").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Io {
            path: PathBuf::from("/tmp/habits.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/habits.json"));
        assert!(msg.contains("denied"));
    }
}
