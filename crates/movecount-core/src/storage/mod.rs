mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use crate::counter::CounterRecord;
use crate::error::StorageError;

/// Persistence contract the session depends on: one load at start, one save
/// at teardown. The store is an opaque key-to-integer map with no versioning.
pub trait CounterStore {
    /// Load the persisted record, applying field-level defaults for keys
    /// that are absent or unreadable.
    fn load_record(&self) -> Result<CounterRecord, StorageError>;

    /// Overwrite all persisted fields from the record.
    fn save_record(&self, record: &CounterRecord) -> Result<(), StorageError>;
}

impl<T: CounterStore + ?Sized> CounterStore for &T {
    fn load_record(&self) -> Result<CounterRecord, StorageError> {
        (**self).load_record()
    }

    fn save_record(&self, record: &CounterRecord) -> Result<(), StorageError> {
        (**self).save_record(record)
    }
}

/// Returns `~/.config/movecount[-dev]/` based on MOVECOUNT_ENV.
///
/// Set MOVECOUNT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOVECOUNT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("movecount-dev")
    } else {
        base_dir.join("movecount")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
