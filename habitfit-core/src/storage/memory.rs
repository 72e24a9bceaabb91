use std::cell::RefCell;
use std::collections::HashMap;

use super::{KeyValueStorage, StorageError};

/// In-memory storage provider.
///
/// Nothing survives the process. Single-threaded by construction.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with one record.
    pub fn with_record(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.borrow_mut().insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.borrow().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
