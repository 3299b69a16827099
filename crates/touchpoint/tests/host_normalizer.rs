use touchpoint::attribution::normalize_host;

#[test]
fn clears_scheme_and_www_for_common_formats() {
    assert_eq!(normalize_host("http://example.com"), "example.com");
    assert_eq!(normalize_host("https://example.com"), "example.com");
    assert_eq!(normalize_host("www.example.com"), "example.com");
    assert_eq!(normalize_host("http://www.example.com"), "example.com");
    assert_eq!(normalize_host("https://www.example.com"), "example.com");
}

#[test]
fn leaves_bare_and_nested_hosts_untouched() {
    assert_eq!(normalize_host("example.com"), "example.com");
    assert_eq!(normalize_host("news.blog.google.com"), "news.blog.google.com");
    assert_eq!(normalize_host("wwwexample.com"), "wwwexample.com");
}

#[test]
fn normalization_is_idempotent_on_single_prefix_hostnames() {
    let samples = [
        "",
        "example.com",
        "www.example.com",
        "https://www.example.com",
        "http://www.google.com.ua",
        "m.facebook.com",
        "l.instagram.com",
    ];

    for sample in samples {
        let once = normalize_host(sample);
        assert_eq!(normalize_host(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn repeated_www_labels_lose_one_label_per_pass() {
    let once = normalize_host("www.www.example.com");
    assert_eq!(once, "www.example.com");
    assert_eq!(normalize_host(&once), "example.com");
}
