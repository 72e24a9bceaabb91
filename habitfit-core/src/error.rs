//! Store error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by store mutations and loads.
///
/// Not-found conditions are never errors; mutations report them as a
/// no-op through their return value instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode record '{key}': {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("Failed to decode record '{key}': {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
}
