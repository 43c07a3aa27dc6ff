// ABOUTME: Structured-data pass combining meta tags, JSON-LD and the <title> fallback into one JobFields.
// ABOUTME: JSON-LD overrides meta tags here; this is the only overriding merge in the pipeline.

//! Structured-data extraction.
//!
//! Order of operations:
//! 1. Meta tags (Open Graph, Twitter card, `meta[name=description]`) are read first.
//! 2. JSON-LD `JobPosting` values then overwrite them field by field.
//! 3. The `<title>` element fills whatever is still empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{first_attr, Queryable};
use crate::extractors::json_ld::extract_json_ld;
use crate::record::{non_empty, JobFields};

const TITLE_META: &[&str] = &[
    "meta[property='og:title']",
    "meta[name='og:title']",
    "meta[name='twitter:title']",
    "meta[property='twitter:title']",
];

const SITE_NAME_META: &[&str] = &[
    "meta[property='og:site_name']",
    "meta[name='og:site_name']",
    "meta[name='application-name']",
];

const DESCRIPTION_META: &[&str] = &[
    "meta[property='og:description']",
    "meta[name='og:description']",
    "meta[name='twitter:description']",
    "meta[property='twitter:description']",
    "meta[name='description']",
];

/// "<position> at|@|-|–|—|| <company>", split on the first separator.
static TITLE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+(?:at|@|-|–|—|\|)\s+(.+)$").expect("valid title regex"));

/// Reads position, company and description from meta tags.
pub fn extract_meta_tags(doc: &dyn Queryable) -> JobFields {
    JobFields {
        position: first_attr(doc, TITLE_META, "content"),
        company_name: first_attr(doc, SITE_NAME_META, "content"),
        job_description: first_attr(doc, DESCRIPTION_META, "content"),
        ..Default::default()
    }
}

/// Splits a page title into position and company.
///
/// Returns the whole title as position when no separator is present.
pub fn split_title(title: &str) -> JobFields {
    match TITLE_SPLIT_RE.captures(title) {
        Some(caps) => JobFields {
            position: caps.get(1).and_then(|m| non_empty(m.as_str())),
            company_name: caps.get(2).and_then(|m| non_empty(m.as_str())),
            ..Default::default()
        },
        None => JobFields {
            position: non_empty(title),
            ..Default::default()
        },
    }
}

/// Runs the complete structured-data pass.
pub fn extract_from_meta(doc: &dyn Queryable) -> JobFields {
    let mut fields = extract_meta_tags(doc);
    fields.overlay(extract_json_ld(doc));

    if fields.position.is_none() {
        if let Some(title) = doc.select_text("title") {
            fields.fill_from(split_title(&title));
        }
    }
    fields
}
