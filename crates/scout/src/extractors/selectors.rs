// ABOUTME: Selector-based passes: the matched site pattern's selectors, then generic per-field fallbacks.
// ABOUTME: Salary text is only taken from site patterns and is handed to the salary normalizer.

use crate::dom::{first_text, Queryable};
use crate::extractors::patterns::SitePattern;
use crate::record::JobFields;
use crate::salary::parse_salary;

pub const GENERIC_POSITION_SELECTORS: &[&str] = &[
    "h1",
    ".job-title",
    "[class*='job-title']",
    "[class*='jobTitle']",
    "[class*='position']",
];

pub const GENERIC_COMPANY_SELECTORS: &[&str] = &[
    ".company-name",
    "[class*='company-name']",
    "[class*='companyName']",
    "[class*='employer']",
    "[itemprop='hiringOrganization']",
];

pub const GENERIC_LOCATION_SELECTORS: &[&str] = &[
    ".job-location",
    "[class*='job-location']",
    "[class*='jobLocation']",
    "[itemprop='jobLocation']",
    "[class*='location']",
];

pub const GENERIC_DESCRIPTION_SELECTORS: &[&str] = &[
    ".job-description",
    "[class*='job-description']",
    "[class*='jobDescription']",
    "[itemprop='description']",
    "[class*='description']",
    "article",
    "main",
];

/// Applies a site pattern's selectors. Each field takes the first selector with non-empty text.
pub fn extract_with_pattern(doc: &dyn Queryable, pattern: &SitePattern) -> JobFields {
    let sel = &pattern.selectors;
    let mut fields = JobFields {
        position: first_text(doc, &sel.title),
        company_name: first_text(doc, &sel.company),
        location: first_text(doc, &sel.location),
        job_description: first_text(doc, &sel.description),
        ..Default::default()
    };

    if let Some(text) = first_text(doc, &sel.salary) {
        let salary = parse_salary(&text);
        fields.salary_min = salary.min;
        fields.salary_max = salary.max;
        fields.salary_currency = salary.currency;
    }
    fields
}

/// Applies the generic selector lists shared by every site.
pub fn extract_generic(doc: &dyn Queryable) -> JobFields {
    JobFields {
        position: first_text(doc, GENERIC_POSITION_SELECTORS),
        company_name: first_text(doc, GENERIC_COMPANY_SELECTORS),
        location: first_text(doc, GENERIC_LOCATION_SELECTORS),
        job_description: first_text(doc, GENERIC_DESCRIPTION_SELECTORS),
        ..Default::default()
    }
}

/// Runs the site pass (when a pattern matched) followed by the generic pass, never overwriting.
pub fn extract_by_selectors(doc: &dyn Queryable, pattern: Option<&SitePattern>) -> JobFields {
    let site = pattern
        .map(|p| extract_with_pattern(doc, p))
        .unwrap_or_default();
    JobFields::merge_all([site, extract_generic(doc)])
}
