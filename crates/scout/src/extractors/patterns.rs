// ABOUTME: Site pattern data model, registry, and the loader for the embedded job-board table.
// ABOUTME: Each pattern maps a job-board domain to ordered selector lists for title, company, location, salary and description.

//! Site-specific selector patterns.
//!
//! The builtin table lives in `data/site_patterns.json` and is compiled into
//! the binary. Adding a job board is a data change: append an entry with its
//! domain, display name and selectors.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

/// Embedded JSON containing the builtin job-board patterns.
const BUILTIN_PATTERNS_JSON: &str = include_str!("../../data/site_patterns.json");

static BUILTIN_REGISTRY: Lazy<PatternRegistry> = Lazy::new(load_builtin_registry);

/// Ordered selector lists per field. An empty list means the board defines none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternSelectors {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub company: Vec<String>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default)]
    pub salary: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

impl PatternSelectors {
    /// Iterates over every selector string across all fields.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.title
            .iter()
            .chain(&self.company)
            .chain(&self.location)
            .chain(&self.salary)
            .chain(&self.description)
            .map(String::as_str)
    }
}

/// Selector configuration for one job board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitePattern {
    /// Registrable domain, matched against the URL host on a label boundary.
    pub domain: String,
    pub display_name: String,
    #[serde(default)]
    pub selectors: PatternSelectors,
}

impl SitePattern {
    /// Returns true if `host` is the pattern's domain or one of its subdomains.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let domain = self.domain.to_ascii_lowercase();
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

/// Ordered collection of site patterns. The first matching entry wins.
#[derive(Debug, Default, Clone)]
pub struct PatternRegistry {
    patterns: Vec<SitePattern>,
}

impl PatternRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pattern. Earlier registrations take precedence on overlapping domains.
    pub fn register(&mut self, pattern: SitePattern) {
        self.patterns.push(pattern);
    }

    /// Finds the pattern for a host name.
    pub fn find_for_host(&self, host: &str) -> Option<&SitePattern> {
        self.patterns.iter().find(|p| p.matches_host(host))
    }

    /// Finds the pattern for a parsed URL.
    pub fn find_for_url(&self, url: &Url) -> Option<&SitePattern> {
        url.host_str().and_then(|h| self.find_for_host(h))
    }

    /// Iterates over the registered patterns in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &SitePattern> {
        self.patterns.iter()
    }

    /// Returns the number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no patterns are registered.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Loads the builtin pattern registry from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed; the unit tests below load it.
pub fn load_builtin_registry() -> PatternRegistry {
    let patterns: Vec<SitePattern> =
        serde_json::from_str(BUILTIN_PATTERNS_JSON).expect("failed to parse builtin site patterns");

    let mut registry = PatternRegistry::new();
    for pattern in patterns {
        registry.register(pattern);
    }
    registry
}

/// Shared builtin registry, parsed on first use.
pub fn builtin_registry() -> &'static PatternRegistry {
    &BUILTIN_REGISTRY
}
