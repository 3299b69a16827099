use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::VisitStore;
use crate::utils::time::{Clock, SystemClock, expiry_unix_ms};

pub const STORE_TABLE: &str = "touchpoint_store";

const CREATE_STORE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS touchpoint_store (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    expires_at_unix_ms INTEGER NOT NULL
);
"#;

/// Durable store backing the command line adapter.
pub struct SqliteStore<C = SystemClock> {
    connection: Connection,
    clock: C,
}

impl SqliteStore<SystemClock> {
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_clock(path, SystemClock)
    }
}

impl<C: Clock> SqliteStore<C> {
    pub fn open_with_clock(path: &Path, clock: C) -> Result<Self> {
        let connection = open_sqlite_connection(path)?;
        Self::from_connection(connection, clock)
    }

    pub fn in_memory(clock: C) -> Result<Self> {
        let connection =
            Connection::open_in_memory().context("failed to open in-memory sqlite database")?;
        Self::from_connection(connection, clock)
    }

    fn from_connection(connection: Connection, clock: C) -> Result<Self> {
        ensure_store_schema(&connection)?;
        Ok(Self { connection, clock })
    }

    /// Deletes expired rows; returns how many were removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = to_sql_ms(self.clock.now_unix_ms());
        self.connection
            .execute(
                &format!("DELETE FROM {STORE_TABLE} WHERE expires_at_unix_ms <= ?1"),
                params![now],
            )
            .context("failed to purge expired store rows")
    }
}

impl<C: Clock> VisitStore for SqliteStore<C> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let now = to_sql_ms(self.clock.now_unix_ms());
        let value = self
            .connection
            .query_row(
                &format!(
                    "SELECT value FROM {STORE_TABLE} WHERE key = ?1 AND expires_at_unix_ms > ?2"
                ),
                params![key, now],
                |row| row.get::<usize, String>(0),
            )
            .optional()
            .with_context(|| format!("failed to read store key `{key}`"))?;
        Ok(value.filter(|value| !value.is_empty()))
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        let expires_at = to_sql_ms(expiry_unix_ms(self.clock.now_unix_ms(), ttl_days));
        self.connection
            .execute(
                &format!(
                    "INSERT INTO {STORE_TABLE} (key, value, expires_at_unix_ms) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        expires_at_unix_ms = excluded.expires_at_unix_ms"
                ),
                params![key, value, expires_at],
            )
            .with_context(|| format!("failed to write store key `{key}`"))?;
        Ok(())
    }
}

pub fn open_sqlite_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| {
            format!(
                "failed to create sqlite parent directory: {}",
                parent.display()
            )
        })?;
    }

    Connection::open(path)
        .with_context(|| format!("failed to open sqlite database: {}", path.display()))
}

pub fn ensure_store_schema(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(CREATE_STORE_TABLE_SQL)
        .context("failed to create sqlite store schema")
}

fn to_sql_ms(unix_ms: u64) -> i64 {
    i64::try_from(unix_ms).unwrap_or(i64::MAX)
}
