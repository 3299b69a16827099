/// `{source, medium}` pair assigned by a classification stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceMatch {
    pub source: String,
    pub medium: String,
}

impl SourceMatch {
    #[must_use]
    pub fn new(source: impl Into<String>, medium: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            medium: medium.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownSource {
    pub domain: &'static str,
    pub source: &'static str,
    pub medium: &'static str,
}

impl KnownSource {
    #[must_use]
    pub fn to_match(self) -> SourceMatch {
        SourceMatch::new(self.source, self.medium)
    }

    /// True for the bare domain or any true subdomain of it.
    #[must_use]
    pub fn covers(self, host: &str) -> bool {
        host == self.domain
            || host
                .strip_suffix(self.domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

// Iteration order is significant: the first covering entry wins.
pub const KNOWN_SOURCES: [KnownSource; 12] = [
    KnownSource {
        domain: "google.com",
        source: "google",
        medium: "organic",
    },
    KnownSource {
        domain: "google.com.ua",
        source: "google",
        medium: "organic",
    },
    KnownSource {
        domain: "bing.com",
        source: "bing",
        medium: "organic",
    },
    KnownSource {
        domain: "yahoo.com",
        source: "yahoo",
        medium: "organic",
    },
    KnownSource {
        domain: "duckduckgo.com",
        source: "duckduckgo",
        medium: "organic",
    },
    KnownSource {
        domain: "instagram.com",
        source: "instagram",
        medium: "social",
    },
    KnownSource {
        domain: "l.instagram.com",
        source: "instagram",
        medium: "social",
    },
    KnownSource {
        domain: "facebook.com",
        source: "facebook",
        medium: "social",
    },
    KnownSource {
        domain: "l.facebook.com",
        source: "facebook",
        medium: "social",
    },
    KnownSource {
        domain: "m.facebook.com",
        source: "facebook",
        medium: "social",
    },
    KnownSource {
        domain: "twitter.com",
        source: "twitter",
        medium: "social",
    },
    KnownSource {
        domain: "linkedin.com",
        source: "linkedin",
        medium: "social",
    },
];

#[must_use]
pub fn known_sources() -> &'static [KnownSource] {
    &KNOWN_SOURCES
}

#[must_use]
pub fn lookup_exact(host: &str) -> Option<KnownSource> {
    KNOWN_SOURCES.iter().copied().find(|entry| entry.domain == host)
}

/// First entry in table order that covers `host` as domain or subdomain.
#[must_use]
pub fn lookup_covering(host: &str) -> Option<KnownSource> {
    KNOWN_SOURCES.iter().copied().find(|entry| entry.covers(host))
}
