//! Traffic-source attribution for a single page load.
//!
//! Signals are merged in a fixed order: the instagram lite pre-check, then
//! ad click identifiers, then the referrer, and finally explicit `utm_*`
//! query parameters, which override per field.

use tracing::debug;

pub mod click_id;
pub mod host;
pub mod query;
pub mod referrer;
pub mod sources;

pub use click_id::detect_click_id;
pub use host::normalize_host;
pub use query::QueryParams;
pub use referrer::{classify_referrer, is_external_referrer};
pub use sources::{KnownSource, SourceMatch, known_sources};

use crate::models::{AttributionTuple, UTM_PARAMS, visit::UTM_SOURCE};

#[must_use]
pub fn resolve_attribution(
    params: &QueryParams,
    referrer: &str,
    current_domain: &str,
) -> AttributionTuple {
    let mut tuple = AttributionTuple::default();

    if let Some(matched) = referrer::instagram_lite_match(referrer) {
        apply_match(&mut tuple, matched);
    }

    if tuple.is_direct()
        && let Some(matched) = detect_click_id(params)
    {
        debug!(source = %matched.source, medium = %matched.medium, "click id detected");
        apply_match(&mut tuple, matched);
    }

    if tuple.is_direct()
        && !params.has(UTM_SOURCE)
        && let Some(matched) = classify_referrer(referrer, current_domain)
    {
        apply_match(&mut tuple, matched);
    }

    apply_explicit_params(&mut tuple, params);
    tuple
}

/// Overrides each tuple field whose `utm_*` parameter is present, empty values included.
pub fn apply_explicit_params(tuple: &mut AttributionTuple, params: &QueryParams) {
    for param in UTM_PARAMS {
        if let Some(value) = params.get(param)
            && let Some(field) = tuple.field_mut(param)
        {
            *field = value.to_string();
        }
    }
}

fn apply_match(tuple: &mut AttributionTuple, matched: SourceMatch) {
    tuple.utm_source = matched.source;
    tuple.utm_medium = matched.medium;
}
