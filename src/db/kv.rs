//! Key-value backends for the clock store.

use std::collections::HashMap;

use rusqlite::{OptionalExtension, params};

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Minimal string key-value contract; the clock store layers typed
/// encoding on top of it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;

    /// Audit hook for business operations. Backends without an audit
    /// trail ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) {}
}

/// Production backend: the `kv` table of the application database.
pub struct SqliteKv {
    pool: DbPool,
}

impl SqliteKv {
    /// Open (or create) the database at `path` and run pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        // non blocking: a failed audit line never fails the operation
        if let Err(e) = crate::db::log::ttlog(&self.pool.conn, operation, target, message) {
            tracing::warn!(error = %e, operation, "failed to write internal log");
        }
    }
}

/// Volatile backend used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    values: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_kv_upserts_and_removes() {
        let mut kv = SqliteKv::in_memory().unwrap();
        assert_eq!(kv.get("a").unwrap(), None);

        kv.set("a", "1").unwrap();
        kv.set("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("2"));

        kv.remove("a").unwrap();
        assert_eq!(kv.get("a").unwrap(), None);
    }

    #[test]
    fn sqlite_kv_audit_writes_log_rows() {
        let mut kv = SqliteKv::in_memory().unwrap();
        kv.audit("clock_in", "session", "Clocked in");
        let rows = crate::db::log::load_log(kv.conn()).unwrap();
        assert!(rows.iter().any(|r| r.operation == "clock_in"));
    }
}
