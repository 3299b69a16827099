use std::collections::BTreeMap;

use anyhow::{Result, bail};

use super::VisitStore;
use crate::utils::time::{Clock, SystemClock, expiry_unix_ms};

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredValue {
    value: String,
    expires_at_unix_ms: u64,
}

/// In-process store, used by tests and by embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<C = SystemClock> {
    entries: BTreeMap<String, StoredValue>,
    clock: C,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore<SystemClock> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> MemoryStore<C> {
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: BTreeMap::new(),
            clock,
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Makes every subsequent `get` fail, as an unreadable backing store would.
    pub fn set_fail_reads(&mut self, fail_reads: bool) {
        self.fail_reads = fail_reads;
    }

    /// Makes every subsequent `set` fail, as a full or blocked cookie jar would.
    pub fn set_fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }

    /// Writes `value` even while writes are set to fail.
    pub fn insert_raw(&mut self, key: &str, value: &str, ttl_days: u32) {
        self.entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at_unix_ms: expiry_unix_ms(self.clock.now_unix_ms(), ttl_days),
            },
        );
    }
}

impl<C: Clock> VisitStore for MemoryStore<C> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            bail!("memory store rejected read for `{key}`");
        }
        let now = self.clock.now_unix_ms();
        Ok(self
            .entries
            .get(key)
            .filter(|stored| stored.expires_at_unix_ms > now)
            .map(|stored| stored.value.clone())
            .filter(|value| !value.is_empty()))
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        if self.fail_writes {
            bail!("memory store rejected write for `{key}`");
        }
        self.insert_raw(key, value, ttl_days);
        Ok(())
    }
}
