//! File-per-key storage for persisting records to disk.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::{KeyValueStorage, StorageError};

/// Storage that keeps each record in `<data_dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Creates a new storage instance rooted at `data_dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the full path for a record key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn checked_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.path(key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.checked_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.checked_path(key)?;

        fs::create_dir_all(&self.data_dir).map_err(|e| StorageError::Io {
            path: self.data_dir.clone(),
            source: e,
        })?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| StorageError::Io {
            path: tmp_path.clone(),
            source: e,
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| StorageError::Io { path, source: e })?;

        tracing::debug!("Wrote {} byte(s) to {}", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_path() {
        let (storage, _temp) = test_storage();
        let path = storage.path("habit-tracker-data");
        assert!(path.ends_with("habit-tracker-data.json"));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let (storage, _temp) = test_storage();
        assert!(storage.get("nutrition_meals").unwrap().is_none());
        assert!(!storage.path("nutrition_meals").exists());
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let storage = FileStorage::new(nested_dir.clone());

        storage.set("nutrition_profile", "{}").unwrap();

        assert!(nested_dir.exists());
        assert!(storage.path("nutrition_profile").exists());
    }

    #[test]
    fn test_overwrite_existing_record() {
        let (storage, _temp) = test_storage();

        storage.set("nutrition_meals", "[1]").unwrap();
        storage.set("nutrition_meals", "[2]").unwrap();

        assert_eq!(
            storage.get("nutrition_meals").unwrap(),
            Some("[2]".to_string())
        );
        assert!(!storage
            .path("nutrition_meals")
            .with_extension("json.tmp")
            .exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (storage, _temp) = test_storage();

        let result = storage.set("../escape", "x");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.get("");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
