use chrono::Utc;
use habitfit_core::{KeyValueStorage, StorageError};
use sqlx::SqlitePool;
use std::path::Path;
use tokio::runtime::Runtime;

use super::init_db;

/// Record storage backed by a single SQLite key-value table.
///
/// Stores are synchronous, so the pool is driven by a private
/// current-thread runtime. Must not be used from inside another runtime.
pub struct SqliteStorage {
    pool: SqlitePool,
    runtime: Runtime,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let pool = runtime.block_on(init_db(path)).map_err(backend_error)?;
        tracing::debug!("Opened SQLite storage at {}", path.display());

        Ok(Self { pool, runtime })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> = self
            .runtime
            .block_on(
                sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
                    .bind(key)
                    .fetch_optional(&self.pool),
            )
            .map_err(backend_error)?;

        Ok(row.map(|(value,)| value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.runtime
            .block_on(
                sqlx::query(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                )
                .bind(key)
                .bind(value)
                .bind(Utc::now().to_rfc3339())
                .execute(&self.pool),
            )
            .map_err(backend_error)?;

        tracing::debug!("Wrote record '{}' ({} bytes) to SQLite", key, value.len());
        Ok(())
    }
}

impl Drop for SqliteStorage {
    fn drop(&mut self) {
        // close the pool while its runtime is still alive
        self.runtime.block_on(self.pool.close());
    }
}

fn backend_error(e: sqlx::Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitfit_core::{HabitStore, NutritionStore};
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = SqliteStorage::open(&temp_dir.path().join("habitfit.db")).unwrap();
        (temp_dir, storage)
    }

    fn stored_keys(storage: &SqliteStorage) -> Vec<String> {
        let rows: Vec<(String,)> = storage
            .runtime
            .block_on(
                sqlx::query_as("SELECT key FROM kv_store ORDER BY key").fetch_all(&storage.pool),
            )
            .unwrap();
        rows.into_iter().map(|(key,)| key).collect()
    }

    #[test]
    fn test_get_missing_key() {
        let (_temp_dir, storage) = setup();
        assert_eq!(storage.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_temp_dir, storage) = setup();
        storage.set("greeting", "hello").unwrap();
        assert_eq!(storage.get("greeting").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_set_overwrites() {
        let (_temp_dir, storage) = setup();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(stored_keys(&storage), vec!["k".to_string()]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("habitfit.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.set("nutrition_meals", "[]").unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.get("nutrition_meals").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_backs_both_stores() {
        let (_temp_dir, storage) = setup();

        let mut habits = HabitStore::load(&storage).unwrap();
        habits.add("Stretch", "🤸", None).unwrap();

        let mut nutrition = NutritionStore::load(&storage).unwrap();
        nutrition.setup_profile(25, 70.0, 175.0).unwrap();

        let keys = stored_keys(&storage);
        assert_eq!(
            keys,
            vec![
                "habit-tracker-data".to_string(),
                "nutrition_profile".to_string()
            ]
        );

        let reloaded = HabitStore::load(&storage).unwrap();
        assert_eq!(reloaded.habits()[0].name, "Stretch");
    }
}
