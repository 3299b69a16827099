use super::query::QueryParams;
use super::sources::SourceMatch;

/// Ad-platform click identifiers in detection order.
pub const CLICK_ID_RULES: [(&str, &str, &str); 4] = [
    ("fbclid", "facebook", "social"),
    ("gclid", "google", "cpc"),
    ("dclid", "doubleclick", "display"),
    ("gad_source", "google", "cpc"),
];

/// First click identifier present in `params`; parameter values are ignored.
#[must_use]
pub fn detect_click_id(params: &QueryParams) -> Option<SourceMatch> {
    CLICK_ID_RULES
        .iter()
        .find(|(param, _, _)| params.has(param))
        .map(|(_, source, medium)| SourceMatch::new(*source, *medium))
}
