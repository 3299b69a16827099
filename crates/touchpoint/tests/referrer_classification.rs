use touchpoint::attribution::{SourceMatch, classify_referrer, known_sources};

const SITE: &str = "example.com";

fn classify(referrer: &str) -> Option<(String, String)> {
    classify_referrer(referrer, SITE).map(|matched| (matched.source, matched.medium))
}

fn pair(source: &str, medium: &str) -> Option<(String, String)> {
    Some((source.to_string(), medium.to_string()))
}

#[test]
fn search_engines_classify_as_organic() {
    let cases = [
        ("https://www.google.com/search?q=test+query", "google"),
        ("https://www.google.com.ua/search?q=test+query", "google"),
        ("https://www.bing.com/search?q=test+query", "bing"),
        ("https://search.yahoo.com/search?p=test+query", "yahoo"),
        ("https://duckduckgo.com/?q=test+query", "duckduckgo"),
    ];

    for (referrer, source) in cases {
        assert_eq!(classify(referrer), pair(source, "organic"), "{referrer}");
    }
}

#[test]
fn social_networks_classify_as_social() {
    let cases = [
        ("https://www.instagram.com/p/somepost/", "instagram"),
        ("https://l.instagram.com/?u=https%3A%2F%2Fexample.org", "instagram"),
        ("https://www.facebook.com/somepage", "facebook"),
        ("https://m.facebook.com/somepage", "facebook"),
        ("https://l.facebook.com/l.php?u=x", "facebook"),
        ("https://twitter.com/someone/status/123456789", "twitter"),
        ("https://www.linkedin.com/feed/", "linkedin"),
    ];

    for (referrer, source) in cases {
        assert_eq!(classify(referrer), pair(source, "social"), "{referrer}");
    }
}

#[test]
fn subdomains_classify_like_their_known_domain() {
    for entry in known_sources() {
        let bare = classify_referrer(&format!("https://{}/page", entry.domain), SITE);
        let nested = classify_referrer(&format!("https://news.blog.{}/page", entry.domain), SITE);
        assert_eq!(bare, nested, "{}", entry.domain);
        assert_eq!(bare, Some(SourceMatch::new(entry.source, entry.medium)));
    }
}

#[test]
fn lookalike_domains_are_referrals_not_known_sources() {
    assert_eq!(
        classify("https://notgoogle.com/page"),
        pair("notgoogle.com", "referral")
    );
}

#[test]
fn google_search_path_wins_on_any_google_host() {
    assert_eq!(
        classify("https://images.google.com/search?q=cats"),
        pair("google", "organic")
    );
}

#[test]
fn unknown_sites_classify_as_referral_by_host() {
    assert_eq!(
        classify("https://some-other-site.com/page"),
        pair("some-other-site.com", "referral")
    );
    assert_eq!(
        classify("https://www.reddit.com/r/javascript"),
        pair("reddit.com", "referral")
    );
}

#[test]
fn referrer_without_scheme_is_still_classified() {
    assert_eq!(classify("www.bing.com/search?q=x"), pair("bing", "organic"));
}

#[test]
fn empty_and_same_site_referrers_carry_no_signal() {
    assert_eq!(classify(""), None);
    assert_eq!(classify_referrer("https://mysite.com/some-page", "mysite.com"), None);
}

#[test]
fn malformed_referrers_carry_no_signal() {
    assert_eq!(classify("invalid-url"), None);
    assert_eq!(classify("https://"), None);
}

#[test]
fn unparseable_url_falls_back_to_manual_domain_extraction() {
    let matched = classify_referrer("https://www.shop example.org/item?id=1", SITE)
        .expect("manual extraction should recover a host");
    assert_eq!(matched.medium, "referral");
    assert_eq!(matched.source, "shop example.org");
}

#[test]
fn single_label_hosts_classify_as_referral() {
    assert_eq!(classify("http://localhost:3000/page"), pair("localhost", "referral"));
    assert_eq!(classify("https://intranet/home"), pair("intranet", "referral"));
}

#[test]
fn unknown_page_hostname_treats_every_referrer_as_internal() {
    assert_eq!(classify_referrer("https://some-other-site.com/page", ""), None);
    assert_eq!(classify_referrer("https://www.google.com/search?q=a", ""), None);
}
