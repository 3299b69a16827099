/// Strips one leading `http://`, then one leading `https://`, then one leading `www.`.
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let mut result = host;
    if let Some(rest) = result.strip_prefix("http://") {
        result = rest;
    }
    if let Some(rest) = result.strip_prefix("https://") {
        result = rest;
    }
    if let Some(rest) = result.strip_prefix("www.") {
        result = rest;
    }
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_host;

    #[test]
    fn strips_scheme_and_www_prefixes() {
        assert_eq!(normalize_host("http://example.com"), "example.com");
        assert_eq!(normalize_host("https://example.com"), "example.com");
        assert_eq!(normalize_host("www.example.com"), "example.com");
        assert_eq!(normalize_host("http://www.example.com"), "example.com");
        assert_eq!(normalize_host("https://www.example.com"), "example.com");
    }

    #[test]
    fn scheme_match_is_case_sensitive() {
        assert_eq!(normalize_host("HTTPS://www.example.com"), "HTTPS://www.example.com");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_host(""), "");
    }

    #[test]
    fn strips_only_one_www_label() {
        assert_eq!(normalize_host("www.www.example.com"), "www.example.com");
    }
}
