//! Persisted key-value stores holding the serialized ledger.

use anyhow::Result;

pub mod cookie;
pub mod memory;
pub mod sqlite;

pub use cookie::{SameSite, parse_cookie_header, render_cookie};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String store with per-entry expiry, the shape of a browser cookie jar.
///
/// Expired entries read as absent. `set` replaces the value and restarts the
/// TTL.
pub trait VisitStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()>;
}

impl<S: VisitStore + ?Sized> VisitStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        (**self).set(key, value, ttl_days)
    }
}

impl<S: VisitStore + ?Sized> VisitStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        (**self).set(key, value, ttl_days)
    }
}
