//! SQLite-backed key-value persistence for the counter record.
//!
//! The wire contract is four stable integer-valued keys. `(targetHour,
//! targetMinute) == (0, 0)` encodes "target not reached"; `cutoffCount < 0`
//! encodes "cutoff not captured". Keys that are absent or hold unreadable
//! values independently fall back to their defaults -- a partial record is
//! valid, never an error.

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, CounterStore};
use crate::counter::{ClockTime, CounterRecord};
use crate::error::StorageError;

const KEY_MOVE_COUNT: &str = "moveCount";
const KEY_TARGET_HOUR: &str = "targetHour";
const KEY_TARGET_MINUTE: &str = "targetMinute";
const KEY_CUTOFF_COUNT: &str = "cutoffCount";

/// Wire sentinel for an uncaptured cutoff.
const CUTOFF_UNSET: i64 = -1;

/// SQLite database holding the persisted counter record.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/movecount/movecount.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("movecount.db");
        Self::open_at(path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref()).map_err(|source| StorageError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS counter (
                key   TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Read one key. A missing row or a value that cannot be read as an
    /// integer both count as absent.
    fn kv_get(&self, key: &str) -> Result<Option<i64>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM counter WHERE key = ?1")?;
        match stmt.query_row(params![key], |row| row.get::<_, i64>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows)
            | Err(rusqlite::Error::InvalidColumnType(..))
            | Err(rusqlite::Error::FromSqlConversionFailure(..)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, key: &str, value: i64) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO counter (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl CounterStore for Database {
    fn load_record(&self) -> Result<CounterRecord, StorageError> {
        let move_count = self.kv_get(KEY_MOVE_COUNT)?.unwrap_or(0).max(0) as u32;
        let target_hour = self.kv_get(KEY_TARGET_HOUR)?.unwrap_or(0).max(0) as u32;
        let target_minute = self.kv_get(KEY_TARGET_MINUTE)?.unwrap_or(0).max(0) as u32;
        let cutoff = self.kv_get(KEY_CUTOFF_COUNT)?.unwrap_or(CUTOFF_UNSET);

        // (0, 0) is the wire encoding for "target not reached yet".
        let target_time = (target_hour != 0 || target_minute != 0)
            .then(|| ClockTime::new(target_hour, target_minute));
        // Any negative value means "not captured".
        let cutoff_count = (cutoff >= 0).then(|| cutoff as u32);

        Ok(CounterRecord {
            move_count,
            target_time,
            cutoff_count,
        })
    }

    fn save_record(&self, record: &CounterRecord) -> Result<(), StorageError> {
        let target = record.target_time.unwrap_or(ClockTime::new(0, 0));
        self.kv_set(KEY_MOVE_COUNT, i64::from(record.move_count))?;
        self.kv_set(KEY_TARGET_HOUR, i64::from(target.hour))?;
        self.kv_set(KEY_TARGET_MINUTE, i64::from(target.minute))?;
        self.kv_set(
            KEY_CUTOFF_COUNT,
            record.cutoff_count.map_or(CUTOFF_UNSET, i64::from),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_loads_defaults() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.load_record().unwrap(), CounterRecord::default());
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let records = [
            CounterRecord::default(),
            CounterRecord {
                move_count: 7,
                target_time: None,
                cutoff_count: None,
            },
            CounterRecord {
                move_count: 12,
                target_time: Some(ClockTime::new(14, 5)),
                cutoff_count: Some(12),
            },
            CounterRecord {
                move_count: 9,
                target_time: None,
                cutoff_count: Some(0),
            },
        ];
        for record in records {
            let db = Database::open_memory().unwrap();
            db.save_record(&record).unwrap();
            assert_eq!(db.load_record().unwrap(), record);
        }
    }

    #[test]
    fn partial_record_fills_missing_fields_with_defaults() {
        let db = Database::open_memory().unwrap();
        db.kv_set(KEY_MOVE_COUNT, 4).unwrap();
        let record = db.load_record().unwrap();
        assert_eq!(record.move_count, 4);
        assert_eq!(record.target_time, None);
        assert_eq!(record.cutoff_count, None);
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let db = Database::open_memory().unwrap();
        db.conn
            .execute(
                "INSERT OR REPLACE INTO counter (key, value) VALUES (?1, ?2)",
                params![KEY_MOVE_COUNT, "not a number"],
            )
            .unwrap();
        db.kv_set(KEY_CUTOFF_COUNT, 6).unwrap();

        let record = db.load_record().unwrap();
        assert_eq!(record.move_count, 0);
        assert_eq!(record.cutoff_count, Some(6));
    }

    #[test]
    fn negative_cutoff_means_uncaptured() {
        let db = Database::open_memory().unwrap();
        db.kv_set(KEY_CUTOFF_COUNT, -1).unwrap();
        assert_eq!(db.load_record().unwrap().cutoff_count, None);
        db.kv_set(KEY_CUTOFF_COUNT, -37).unwrap();
        assert_eq!(db.load_record().unwrap().cutoff_count, None);
    }

    #[test]
    fn record_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movecount.db");

        let record = CounterRecord {
            move_count: 11,
            target_time: Some(ClockTime::new(18, 40)),
            cutoff_count: Some(11),
        };
        {
            let db = Database::open_at(&path).unwrap();
            db.save_record(&record).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load_record().unwrap(), record);
    }
}
