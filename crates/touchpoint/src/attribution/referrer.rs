use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::host::normalize_host;
use super::sources::{SourceMatch, lookup_covering, lookup_exact};
use crate::error::TrackerError;

pub const INSTAGRAM_LITE_HOST: &str = "l.instagram.com";
pub const GOOGLE_SEARCH_MARKER: &str = "google.com/search";
pub const REFERRAL_MEDIUM: &str = "referral";
pub const INVALID_HOST: &str = "invalid-url";

/// True when `referrer` is non-empty and does not mention `current_domain`.
///
/// An empty `current_domain` is contained in every referrer, so nothing is
/// external when the page hostname is unknown.
#[must_use]
pub fn is_external_referrer(referrer: &str, current_domain: &str) -> bool {
    !referrer.is_empty() && !referrer.contains(current_domain)
}

#[must_use]
pub fn instagram_lite_match(referrer: &str) -> Option<SourceMatch> {
    referrer
        .contains(INSTAGRAM_LITE_HOST)
        .then(|| SourceMatch::new("instagram", "social"))
}

/// Classifies an external referrer into a `{source, medium}` guess.
///
/// `None` means the referrer carries no usable signal and the caller keeps
/// whatever source it already has.
#[must_use]
pub fn classify_referrer(referrer: &str, current_domain: &str) -> Option<SourceMatch> {
    if !is_external_referrer(referrer, current_domain) {
        return None;
    }

    if let Some(matched) = instagram_lite_match(referrer) {
        debug!(referrer, "instagram lite referrer");
        return Some(matched);
    }

    let Some(host) = extract_referrer_host(referrer) else {
        debug!(referrer, "referrer host unavailable");
        return None;
    };

    if referrer.contains(GOOGLE_SEARCH_MARKER) {
        debug!(referrer, "google search referrer");
        return Some(SourceMatch::new("google", "organic"));
    }

    if let Some(entry) = lookup_exact(&host) {
        debug!(host = %host, source = entry.source, "known source exact match");
        return Some(entry.to_match());
    }

    if let Some(entry) = lookup_covering(&host) {
        debug!(host = %host, source = entry.source, "known source subdomain match");
        return Some(entry.to_match());
    }

    debug!(host = %host, "unrecognized referrer classified as referral");
    Some(SourceMatch::new(host, REFERRAL_MEDIUM))
}

/// Normalized hostname of `referrer`, or `None` when it is empty or the
/// `invalid-url` placeholder.
#[must_use]
pub fn extract_referrer_host(referrer: &str) -> Option<String> {
    let host = match parse_referrer_url(referrer) {
        Ok(parsed) => parsed.host_str().map(normalize_host).unwrap_or_default(),
        Err(error) => {
            debug!(error = %error, "falling back to manual referrer domain extraction");
            extract_domain_manually(referrer)
        }
    };

    if host.is_empty() || host == INVALID_HOST {
        return None;
    }
    Some(host)
}

fn parse_referrer_url(referrer: &str) -> Result<Url, TrackerError> {
    let candidate = if scheme_regex().is_match(referrer) {
        referrer.to_string()
    } else {
        format!("http://{referrer}")
    };

    Url::parse(&candidate).map_err(|error| TrackerError::MalformedReferrerUrl {
        referrer: referrer.to_string(),
        reason: error.to_string(),
    })
}

fn extract_domain_manually(referrer: &str) -> String {
    let stripped = scheme_and_www_regex().replace(referrer, "");
    stripped
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn scheme_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z]+://").expect("scheme regex should compile"))
}

fn scheme_and_www_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(https?://)?(www\.)?").expect("scheme prefix regex should compile")
    })
}
