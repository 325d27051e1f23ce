//! Event Store - SQLite-backed append-only drink log
//!
//! One row per drink in the `drink_logs` table. SQLite assigns `id`
//! (AUTOINCREMENT, so ids are never reused) and every insert commits on
//! its own with `synchronous = FULL`, so an acknowledged drink survives a
//! crash right after the response.
//!
//! A single connection is shared by the whole process. `rusqlite::Connection`
//! is `Send` but not `Sync`, hence the `std::sync::Mutex`; concurrent
//! appends are serialized on it.

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{DrinkEvent, DrinkRecord, NewDrink};
use chrono::{Local, SecondsFormat};
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Configuration for the event store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("drink_events.db"),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

const CREATE_DRINK_LOGS: &str = "CREATE TABLE IF NOT EXISTS drink_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amountDrank REAL NOT NULL,
    rtcTime TEXT NOT NULL,
    serverTimestamp TEXT NOT NULL,
    drinkNumber INTEGER NOT NULL
)";

/// Durable, append-only log of drink events
pub struct EventStore {
    conn: Mutex<Connection>,
    /// `None` for in-memory stores
    path: Option<PathBuf>,
}

impl EventStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let path = &config.path;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "FULL")?;
        tracing::debug!(path = ?path, journal_mode = %journal_mode, "Opened drink log");

        let store = Self {
            conn: Mutex::new(conn),
            path: Some(path.clone()),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open a private in-memory store (nothing is persisted)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
            path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Ensure the `drink_logs` table exists. Idempotent.
    pub fn initialize(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(CREATE_DRINK_LOGS, [])?;
        Ok(())
    }

    /// Append one drink, stamping it with the current server time.
    ///
    /// Returns the stored row including its generated `id`. Failures are
    /// returned to the caller as-is; nothing is retried.
    pub fn append(&self, drink: &NewDrink) -> StoreResult<DrinkEvent> {
        let server_timestamp = server_timestamp_now();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO drink_logs (amountDrank, rtcTime, serverTimestamp, drinkNumber)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                drink.amount_drank,
                drink.rtc_time,
                server_timestamp,
                drink.drink_number
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(DrinkEvent {
            id,
            amount_drank: drink.amount_drank,
            rtc_time: drink.rtc_time.clone(),
            server_timestamp,
            drink_number: drink.drink_number,
        })
    }

    /// Every drink as `(amount, timestamp, drinkNumber)`, oldest first
    pub fn list_all(&self) -> StoreResult<Vec<DrinkRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT amountDrank, serverTimestamp, drinkNumber FROM drink_logs ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DrinkRecord {
                amount: row.get(0)?,
                timestamp: row.get(1)?,
                drink_number: row.get(2)?,
            })
        })?;

        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Every stored row with all of its columns, oldest first
    pub fn list_events(&self) -> StoreResult<Vec<DrinkEvent>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, amountDrank, rtcTime, serverTimestamp, drinkNumber
             FROM drink_logs ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DrinkEvent {
                id: row.get(0)?,
                amount_drank: row.get(1)?,
                rtc_time: row.get(2)?,
                server_timestamp: row.get(3)?,
                drink_number: row.get(4)?,
            })
        })?;

        let events = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Number of drinks logged so far
    pub fn count(&self) -> StoreResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM drink_logs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Cheap round-trip to SQLite, used by the readiness probe
    pub fn ping(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Database file backing this store, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(format!("Failed to acquire connection lock: {}", e)))
    }
}

/// Local receipt time as RFC 3339 with offset and microseconds,
/// e.g. `2026-10-19T14:03:11.482913+02:00`
fn server_timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tempfile::tempdir;

    fn create_test_store() -> EventStore {
        EventStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = create_test_store();
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = create_test_store();
        store.append(&NewDrink::new(1.0, "t", 1)).unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();

        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let store = create_test_store();

        let first = store.append(&NewDrink::new(8.5, "12:01:00", 1)).unwrap();
        let second = store.append(&NewDrink::new(8.5, "12:01:00", 1)).unwrap();
        let third = store.append(&NewDrink::new(3.0, "12:05:00", 2)).unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);
        // Identical payloads are not deduplicated
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_append_stamps_server_time() {
        let store = create_test_store();
        let before = Local::now();

        let event = store.append(&NewDrink::new(8.5, "12:01:00", 1)).unwrap();

        let stamped = DateTime::parse_from_rfc3339(&event.server_timestamp)
            .unwrap()
            .with_timezone(&Local);
        let after = Local::now();
        assert!(stamped >= before - chrono::Duration::seconds(1));
        assert!(stamped <= after + chrono::Duration::seconds(1));
        assert_eq!(event.rtc_time, "12:01:00");
        assert_eq!(event.amount_drank, 8.5);
        assert_eq!(event.drink_number, 1);
    }

    #[test]
    fn test_list_all_preserves_insertion_order() {
        let store = create_test_store();
        let amounts = [2.0, 0.5, 7.25, 1.0, 3.5];

        let mut stamps = Vec::new();
        for (i, amount) in amounts.iter().enumerate() {
            let event = store
                .append(&NewDrink::new(*amount, format!("10:00:0{}", i), i as i64 + 1))
                .unwrap();
            stamps.push(event.server_timestamp);
        }

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), amounts.len());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.amount, amounts[i]);
            assert_eq!(record.drink_number, i as i64 + 1);
            assert_eq!(record.timestamp, stamps[i]);
        }
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let store = create_test_store();
        store.append(&NewDrink::new(1.5, "a", 1)).unwrap();
        store.append(&NewDrink::new(2.5, "b", 2)).unwrap();

        let first = store.list_all().unwrap();
        let second = store.list_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_amount_is_stored() {
        let store = create_test_store();
        store.append(&NewDrink::new(0.0, "00:00:00", 1)).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 0.0);
    }

    #[test]
    fn test_list_events_returns_full_rows() {
        let store = create_test_store();
        let logged = store.append(&NewDrink::new(6.0, "09:15:00", 4)).unwrap();

        let events = store.list_events().unwrap();
        assert_eq!(events, vec![logged]);
    }

    #[test]
    fn test_ping() {
        let store = create_test_store();
        assert!(store.ping().is_ok());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("nested").join("drinks.db"));

        let logged = {
            let store = EventStore::open(&config).unwrap();
            assert_eq!(store.path(), Some(config.path.as_path()));
            store.append(&NewDrink::new(8.5, "12:01:00", 1)).unwrap()
        };

        let store = EventStore::open(&config).unwrap();
        let events = store.list_events().unwrap();
        assert_eq!(events, vec![logged.clone()]);

        // Ids keep increasing across restarts
        let next = store.append(&NewDrink::new(1.0, "12:02:00", 2)).unwrap();
        assert!(next.id > logged.id);
    }

    #[test]
    fn test_concurrent_appends() {
        let store = std::sync::Arc::new(create_test_store());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.append(&NewDrink::new(1.0, "t", t * 100 + i)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let events = store.list_events().unwrap();
        assert_eq!(events.len(), 100);
        assert!(events.windows(2).all(|w| w[0].id < w[1].id));
    }
}
