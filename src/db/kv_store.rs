use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::db::schema;
use crate::error::{DuesError, DuesResult};

/// A local key-value slot store. Values are opaque strings.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> DuesResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DuesResult<()>;
}

/// SQLite-backed store; one row per key in `kv_slots`.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    pub fn open(path: &Path) -> DuesResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> DuesResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> DuesResult<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM kv_slots WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> DuesResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// In-process store. Clones share the same map, which lets a test keep a
/// handle while the autosaver owns another.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut slots) = store.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> DuesResult<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| DuesError::Other("memory store poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DuesResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| DuesError::Other("memory store poisoned".into()))?;
        slots.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_get_missing_key_is_none() {
        let store = SqliteKvStore::from_connection(schema::test_connection()).unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn sqlite_set_overwrites() {
        let store = SqliteKvStore::from_connection(schema::test_connection()).unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("two".into()));
    }

    #[test]
    fn memory_clones_share_slots() {
        let store = MemoryKvStore::new();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap(), Some("v".into()));
        assert_eq!(other.writes(), 1);
    }
}
