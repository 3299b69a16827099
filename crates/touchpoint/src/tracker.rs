//! Page-load facade wiring the attribution core to a store and a clock.

use anyhow::{Context, Result};
use tracing::{debug, warn};
use url::Url;

use crate::attribution::{QueryParams, resolve_attribution};
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::ledger::{EMPTY_PAYLOAD, apply_visit, decode_ledger, encode_ledger, read_ledger};
use crate::models::{AttributionTuple, VisitLedger};
use crate::store::VisitStore;
use crate::utils::time::{Clock, SystemClock, format_unix_ms};

/// What the host environment knows about the current page view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub query: String,
    pub hostname: String,
    pub referrer: String,
}

impl PageContext {
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        hostname: impl Into<String>,
        referrer: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            hostname: hostname.into(),
            referrer: referrer.into(),
        }
    }

    /// Splits a full page URL into hostname and query string.
    pub fn from_page_url(page_url: &str, referrer: impl Into<String>) -> Result<Self> {
        let parsed =
            Url::parse(page_url).with_context(|| format!("failed to parse page url: {page_url}"))?;
        Ok(Self {
            query: parsed.query().unwrap_or_default().to_string(),
            hostname: parsed.host_str().unwrap_or_default().to_string(),
            referrer: referrer.into(),
        })
    }

    #[must_use]
    pub fn query_params(&self) -> QueryParams {
        QueryParams::parse(&self.query)
    }
}

pub struct Tracker<S, C = SystemClock> {
    store: S,
    clock: C,
    config: TrackerConfig,
    page: PageContext,
}

impl<S: VisitStore> Tracker<S, SystemClock> {
    pub fn new(store: S, page: PageContext) -> Self {
        Self {
            store,
            clock: SystemClock,
            config: TrackerConfig::default(),
            page,
        }
    }
}

impl<S: VisitStore, C: Clock> Tracker<S, C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> Tracker<S, D> {
        Tracker {
            store: self.store,
            clock,
            config: self.config,
            page: self.page,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn resolve_current_attribution(&self) -> AttributionTuple {
        resolve_attribution(
            &self.page.query_params(),
            &self.page.referrer,
            &self.page.hostname,
        )
    }

    /// Ledger as consumers should see it, with a missing `first_visit` repaired.
    #[must_use]
    pub fn load_ledger(&self) -> VisitLedger {
        match self.store.get(&self.config.storage_key) {
            Ok(raw) => read_ledger(raw.as_deref()),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "visit store read failed");
                VisitLedger::default()
            }
        }
    }

    /// Resolves the current visit, folds it into the stored ledger and persists it.
    ///
    /// Never fails: a malformed payload restarts from `{}` and a failed write
    /// leaves the session with an empty ledger, which is returned. When the
    /// store cannot be read nothing is written and the empty ledger is returned.
    pub fn record_visit(&mut self) -> VisitLedger {
        let tuple = self.resolve_current_attribution();
        debug!(
            source = %tuple.utm_source,
            medium = %tuple.utm_medium,
            "resolved current attribution"
        );

        let Some(existing) = self.load_existing_for_write() else {
            return VisitLedger::default();
        };
        let timestamp = format_unix_ms(self.clock.now_unix_ms());
        let ledger = apply_visit(
            existing,
            &tuple,
            &self.page.referrer,
            &self.page.hostname,
            &timestamp,
        );

        match self.persist(&ledger) {
            Ok(()) => ledger,
            Err(error) => {
                warn!(error = %error, "resetting visit ledger after failed write");
                self.reset_store();
                VisitLedger::default()
            }
        }
    }

    /// `None` when the store could not be read, so the visit must not be persisted.
    fn load_existing_for_write(&mut self) -> Option<VisitLedger> {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "visit store read failed, skipping write");
                return None;
            }
        };

        match decode_ledger(raw.as_deref()) {
            Ok(ledger) => Some(ledger),
            Err(error) => {
                warn!(error = %error, "discarding malformed visit ledger");
                self.reset_store();
                Some(VisitLedger::default())
            }
        }
    }

    fn persist(&mut self, ledger: &VisitLedger) -> Result<(), TrackerError> {
        let key = self.config.storage_key.clone();
        let payload = encode_ledger(ledger).map_err(|error| TrackerError::StorageWriteFailure {
            key: key.clone(),
            reason: error.to_string(),
        })?;
        self.store
            .set(&key, &payload, self.config.ttl_days)
            .map_err(|error| TrackerError::StorageWriteFailure {
                key,
                reason: format!("{error:#}"),
            })
    }

    fn reset_store(&mut self) {
        if let Err(error) =
            self.store
                .set(&self.config.storage_key, EMPTY_PAYLOAD, self.config.ttl_days)
        {
            warn!(error = %format!("{error:#}"), "failed to reset visit store");
        }
    }
}
