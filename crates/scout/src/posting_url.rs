// ABOUTME: Cheap, offline guess at whether a URL points at a job posting.
// ABOUTME: Matches known job-board hosts or job-ish path segments; malformed URLs are never postings.

use url::Url;

use crate::extractors::patterns::{builtin_registry, PatternRegistry};

const JOB_PATH_SEGMENTS: &[&str] = &[
    "job",
    "jobs",
    "career",
    "careers",
    "position",
    "positions",
    "opening",
    "openings",
    "opportunity",
    "opportunities",
    "apply",
    "vacancy",
    "vacancies",
    "recruitment",
    "recruiting",
];

/// Returns true if `url` looks like a job posting, judged against the builtin boards.
pub fn is_likely_job_posting(url: &str) -> bool {
    is_likely_job_posting_in(url, builtin_registry())
}

/// Same check against a caller-supplied registry.
pub fn is_likely_job_posting_in(url: &str, registry: &PatternRegistry) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if registry.find_for_url(&parsed).is_some() {
        return true;
    }

    parsed
        .path_segments()
        .map(|mut segments| {
            segments.any(|seg| {
                JOB_PATH_SEGMENTS
                    .iter()
                    .any(|known| seg.eq_ignore_ascii_case(known))
            })
        })
        .unwrap_or(false)
}
