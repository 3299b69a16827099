//! Two-slot visit ledger state machine.
//!
//! `first_visit` is written once, on the load that finds no ledger.
//! `second_visit` is refreshed on every load that carries a non-direct
//! source or an external referrer. Slot repair happens on read only.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::attribution::is_external_referrer;
use crate::error::TrackerError;
use crate::models::{AttributionTuple, VisitLedger, VisitRecord};

pub const EMPTY_PAYLOAD: &str = "{}";

const FIRST_VISIT_KEY: &str = "first_visit";
const SECOND_VISIT_KEY: &str = "second_visit";

/// Referrer worth storing: `referrer` itself when external, otherwise `""`.
#[must_use]
pub fn external_or_empty(referrer: &str, current_domain: &str) -> String {
    if is_external_referrer(referrer, current_domain) {
        referrer.to_string()
    } else {
        String::new()
    }
}

#[must_use]
pub fn should_update_second_visit(
    tuple: &AttributionTuple,
    referrer: &str,
    current_domain: &str,
) -> bool {
    !tuple.is_direct() || is_external_referrer(referrer, current_domain)
}

#[must_use]
pub fn build_visit_record(
    tuple: &AttributionTuple,
    referrer: &str,
    current_domain: &str,
    timestamp: &str,
) -> VisitRecord {
    VisitRecord {
        utm: tuple.clone(),
        referrer: external_or_empty(referrer, current_domain),
        timestamp: timestamp.to_string(),
    }
}

/// Folds the current page load into `ledger`.
#[must_use]
pub fn apply_visit(
    mut ledger: VisitLedger,
    tuple: &AttributionTuple,
    referrer: &str,
    current_domain: &str,
    timestamp: &str,
) -> VisitLedger {
    if ledger.first_visit.is_none() {
        debug!(source = %tuple.utm_source, "recording first visit");
        ledger.first_visit = Some(build_visit_record(
            tuple,
            referrer,
            current_domain,
            timestamp,
        ));
    }

    if should_update_second_visit(tuple, referrer, current_domain) {
        debug!(source = %tuple.utm_source, "refreshing second visit");
        ledger.second_visit = Some(build_visit_record(
            tuple,
            referrer,
            current_domain,
            timestamp,
        ));
    }

    ledger
}

/// Decodes a persisted payload exactly as stored, without slot repair.
///
/// Absent or empty payloads decode to the empty ledger. A slot that is
/// `null` or lacks `utm` decodes as absent.
pub fn decode_ledger(raw: Option<&str>) -> Result<VisitLedger, TrackerError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(VisitLedger::default());
    };

    if !raw.starts_with('{') {
        return Err(malformed("payload is not a json object"));
    }

    let value = serde_json::from_str::<Value>(raw)
        .map_err(|error| malformed(&format!("invalid json: {error}")))?;
    let Value::Object(object) = value else {
        return Err(malformed("payload is not a json object"));
    };

    Ok(VisitLedger {
        first_visit: decode_slot(&object, FIRST_VISIT_KEY)?,
        second_visit: decode_slot(&object, SECOND_VISIT_KEY)?,
    })
}

fn decode_slot(
    object: &Map<String, Value>,
    key: &str,
) -> Result<Option<VisitRecord>, TrackerError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(slot)) if !slot.contains_key("utm") => Ok(None),
        Some(slot) => serde_json::from_value::<VisitRecord>(slot.clone())
            .map(Some)
            .map_err(|error| malformed(&format!("invalid `{key}` slot: {error}"))),
    }
}

fn malformed(reason: &str) -> TrackerError {
    TrackerError::MalformedPersistedPayload {
        reason: reason.to_string(),
    }
}

/// Fills a missing `first_visit` from `second_visit` for consumption.
#[must_use]
pub fn repair_on_read(mut ledger: VisitLedger) -> VisitLedger {
    if ledger.first_visit.is_none()
        && let Some(second_visit) = &ledger.second_visit
    {
        ledger.first_visit = Some(second_visit.clone());
    }
    ledger
}

/// Read path for consumers: decode, degrade malformed payloads to empty, repair.
#[must_use]
pub fn read_ledger(raw: Option<&str>) -> VisitLedger {
    match decode_ledger(raw) {
        Ok(ledger) => repair_on_read(ledger),
        Err(error) => {
            warn!(error = %error, "treating persisted ledger as empty");
            VisitLedger::default()
        }
    }
}

pub fn encode_ledger(ledger: &VisitLedger) -> serde_json::Result<String> {
    serde_json::to_string(ledger)
}
