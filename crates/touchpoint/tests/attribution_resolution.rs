use touchpoint::attribution::{QueryParams, resolve_attribution};
use touchpoint::models::AttributionTuple;

const SITE: &str = "example.com";

fn resolve(query: &str, referrer: &str) -> AttributionTuple {
    resolve_attribution(&QueryParams::parse(query), referrer, SITE)
}

fn tuple(
    source: &str,
    medium: &str,
    campaign: &str,
    term: &str,
    content: &str,
) -> AttributionTuple {
    AttributionTuple {
        utm_source: source.to_string(),
        utm_medium: medium.to_string(),
        utm_campaign: campaign.to_string(),
        utm_term: term.to_string(),
        utm_content: content.to_string(),
    }
}

#[test]
fn explicit_utm_parameters_fill_every_field() {
    let resolved = resolve(
        "?utm_source=google&utm_medium=cpc&utm_campaign=x&utm_term=y&utm_content=z",
        "",
    );
    assert_eq!(resolved, tuple("google", "cpc", "x", "y", "z"));
}

#[test]
fn google_search_referrer_is_organic() {
    let resolved = resolve("", "https://www.google.com/search?q=a");
    assert_eq!(
        resolved,
        tuple("google", "organic", "(not set)", "(not set)", "(not set)")
    );
}

#[test]
fn instagram_lite_referrer_is_social() {
    let resolved = resolve("", "https://l.instagram.com/?u=https%3A%2F%2Fexample.org");
    assert_eq!(resolved.utm_source, "instagram");
    assert_eq!(resolved.utm_medium, "social");
    assert_eq!(resolved.utm_campaign, "(not set)");
}

#[test]
fn gclid_without_referrer_is_paid_google() {
    let resolved = resolve("?gclid=123", "");
    assert_eq!(
        resolved,
        tuple("google", "cpc", "(not set)", "(not set)", "(not set)")
    );
}

#[test]
fn unknown_referrer_is_referral() {
    let resolved = resolve("", "https://some-other-site.com/page");
    assert_eq!(resolved.utm_source, "some-other-site.com");
    assert_eq!(resolved.utm_medium, "referral");
}

#[test]
fn no_signal_resolves_to_direct_defaults() {
    assert_eq!(resolve("", ""), AttributionTuple::default());
    assert_eq!(
        resolve_attribution(&QueryParams::default(), "https://mysite.com/a", "mysite.com"),
        AttributionTuple::default()
    );
    assert_eq!(resolve("", "invalid-url"), AttributionTuple::default());
}

#[test]
fn explicit_source_beats_referrer_and_click_id() {
    let referrers = [
        "",
        "https://www.google.com/search?q=test+query",
        "https://l.instagram.com/?u=x",
        "https://www.facebook.com/somepage",
        "https://some-other-site.com/page",
    ];
    let queries = [
        "?utm_source=newsletter",
        "?gclid=1&utm_source=newsletter",
        "?utm_source=newsletter&fbclid=1&dclid=2",
        "?utm_source=&gad_source=1",
    ];

    for referrer in referrers {
        for query in queries {
            let expected = QueryParams::parse(query)
                .get("utm_source")
                .map(str::to_string)
                .expect("query carries utm_source");
            assert_eq!(
                resolve(query, referrer).utm_source,
                expected,
                "query={query} referrer={referrer}"
            );
        }
    }
}

#[test]
fn explicit_parameters_override_referrer_per_field() {
    let resolved = resolve(
        "?utm_source=newsletter&utm_medium=email&utm_campaign=winter_promo",
        "https://www.google.com/search?q=test+query",
    );
    assert_eq!(
        resolved,
        tuple("newsletter", "email", "winter_promo", "(not set)", "(not set)")
    );
}

#[test]
fn lone_campaign_mixes_with_referrer_source() {
    let resolved = resolve("?utm_campaign=spring", "https://www.bing.com/search?q=a");
    assert_eq!(
        resolved,
        tuple("bing", "organic", "spring", "(not set)", "(not set)")
    );
}

#[test]
fn lone_medium_still_allows_referrer_source() {
    let resolved = resolve("?utm_medium=email", "https://www.facebook.com/somepage");
    assert_eq!(resolved.utm_source, "facebook");
    assert_eq!(resolved.utm_medium, "email");
}

#[test]
fn explicit_medium_overrides_click_id_medium() {
    let resolved = resolve("?gclid=1&utm_medium=display", "");
    assert_eq!(resolved.utm_source, "google");
    assert_eq!(resolved.utm_medium, "display");
}

#[test]
fn click_id_beats_referrer() {
    let resolved = resolve("?fbclid=abc", "https://www.google.com/search?q=a");
    assert_eq!(resolved.utm_source, "facebook");
    assert_eq!(resolved.utm_medium, "social");
}

#[test]
fn instagram_lite_precheck_beats_click_id() {
    let resolved = resolve("?gclid=1", "https://l.instagram.com/?u=x");
    assert_eq!(resolved.utm_source, "instagram");
    assert_eq!(resolved.utm_medium, "social");
}

#[test]
fn campaign_term_and_content_are_preserved() {
    let resolved = resolve(
        "?utm_source=newsletter&utm_medium=email&utm_campaign=spring_sale&utm_term=discount&utm_content=banner",
        "",
    );
    assert_eq!(resolved.utm_campaign, "spring_sale");
    assert_eq!(resolved.utm_term, "discount");
    assert_eq!(resolved.utm_content, "banner");
}

#[test]
fn repeated_parameter_uses_last_value() {
    let resolved = resolve("?utm_source=first&utm_source=second", "");
    assert_eq!(resolved.utm_source, "second");
}

#[test]
fn single_label_referrer_host_is_a_referral() {
    let resolved = resolve("", "https://intranet/home");
    assert_eq!(resolved.utm_source, "intranet");
    assert_eq!(resolved.utm_medium, "referral");
    assert!(!resolved.is_direct());
}

#[test]
fn unknown_page_hostname_keeps_referrer_traffic_direct() {
    let resolved = resolve_attribution(
        &QueryParams::parse(""),
        "https://some-other-site.com/page",
        "",
    );
    assert_eq!(resolved, AttributionTuple::default());

    let tagged = resolve_attribution(&QueryParams::parse("?gclid=1"), "https://x.com/", "");
    assert_eq!(tagged.utm_source, "google");
    assert_eq!(tagged.utm_medium, "cpc");
}
