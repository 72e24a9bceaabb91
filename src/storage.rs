use habitfit_core::{FileStorage, KeyValueStorage, StorageError};

use crate::config::{Config, StorageBackend};
use crate::db::{SqliteStorage, DB_FILE_NAME};

/// Opens the record storage selected by the configuration.
pub fn open_storage(config: &Config) -> Result<Box<dyn KeyValueStorage>, StorageError> {
    let data_dir = &config.data_dir.value;
    tracing::debug!(
        "Using {} storage in {}",
        config.storage.value,
        data_dir.display()
    );

    match config.storage.value {
        StorageBackend::File => Ok(Box::new(FileStorage::new(data_dir.clone()))),
        StorageBackend::Sqlite => Ok(Box::new(SqliteStorage::open(
            &data_dir.join(DB_FILE_NAME),
        )?)),
    }
}
