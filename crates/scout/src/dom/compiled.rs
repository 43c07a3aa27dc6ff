// ABOUTME: Pre-compiled CSS selector cache shared by every extraction run.
// ABOUTME: Invalid selectors are cached as None so a bad pattern entry is parsed only once.

//! Selector caching for efficient repeated DOM queries.
//!
//! Selector parsing is expensive relative to the actual DOM matching, and the
//! same site-pattern and generic selectors are used on every page. The cache
//! compiles each string once and hands out clones afterwards.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for selector strings that do not parse.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            tracing::debug!(selector = css, error = %err, "skipping invalid selector");
            None
        }
    };
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    // Another thread may have inserted while we were compiling.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Precompiles a batch of selectors into the cache.
///
/// Called once when a pattern registry is installed on a client.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for css in selectors {
        get_or_compile(css.as_ref());
    }
}
