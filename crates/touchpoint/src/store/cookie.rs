use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::utils::time::{expiry_unix_ms, format_http_date};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a `document.cookie` / `Set-Cookie` assignment for `name`.
///
/// A zero TTL omits `expires`, producing a session cookie.
#[must_use]
pub fn render_cookie(
    name: &str,
    value: &str,
    ttl_days: u32,
    now_unix_ms: u64,
    path: &str,
    same_site: SameSite,
) -> String {
    let expires = if ttl_days == 0 {
        String::new()
    } else {
        format!(
            "; expires={}",
            format_http_date(expiry_unix_ms(now_unix_ms, ttl_days))
        )
    };
    format!("{name}={value}{expires}; path={path}; SameSite={same_site}")
}

/// Reads `name` from a `Cookie:` header; empty values read as absent.
#[must_use]
pub fn parse_cookie_header(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{SameSite, parse_cookie_header, render_cookie};

    #[test]
    fn renders_expiry_path_and_same_site() {
        let cookie = render_cookie("utm_data", "{}", 30, 0, "/", SameSite::Lax);
        assert_eq!(
            cookie,
            "utm_data={}; expires=Sat, 31 Jan 1970 00:00:00 GMT; path=/; SameSite=Lax"
        );
    }

    #[test]
    fn zero_ttl_renders_session_cookie() {
        let cookie = render_cookie("utm_data", "{}", 0, 0, "/", SameSite::Strict);
        assert_eq!(cookie, "utm_data={}; path=/; SameSite=Strict");
    }

    #[test]
    fn parses_named_cookie_among_others() {
        let header = "a=1; utm_data={\"first_visit\":null}; utm_data_old=x";
        assert_eq!(
            parse_cookie_header(header, "utm_data").as_deref(),
            Some("{\"first_visit\":null}")
        );
        assert_eq!(parse_cookie_header(header, "missing"), None);
    }

    #[test]
    fn prefix_named_cookie_does_not_shadow() {
        let header = "utm_data_old=x; utm_data=y";
        assert_eq!(parse_cookie_header(header, "utm_data").as_deref(), Some("y"));
    }

    #[test]
    fn empty_cookie_value_reads_as_absent() {
        assert_eq!(parse_cookie_header("utm_data=", "utm_data"), None);
    }
}
