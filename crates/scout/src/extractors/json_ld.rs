// ABOUTME: schema.org JobPosting extraction from <script type="application/ld+json"> blocks.
// ABOUTME: Malformed blocks are skipped; the first JobPosting found anywhere in the JSON is mapped onto JobFields.

use serde_json::Value;

use crate::classify::{detect_employment_type, detect_work_type};
use crate::dom::Queryable;
use crate::error::ExtractError;
use crate::formats::html_to_text;
use crate::record::{non_empty, EmploymentType, JobFields, WorkType};
use crate::salary::{parse_salary, HOURS_PER_YEAR};

const LD_JSON_SELECTOR: &str = "script[type^='application/ld+json' i]";

/// Parses one JSON-LD script body.
pub fn parse_block(text: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        ExtractError::parse(String::new(), "JsonLd", Some(anyhow::Error::new(e)))
    })
}

/// Finds the first JobPosting in the document's JSON-LD blocks and maps it.
pub fn extract_json_ld(doc: &dyn Queryable) -> JobFields {
    for block in doc.select_raw(LD_JSON_SELECTOR) {
        let value = match parse_block(&block) {
            Ok(v) => v,
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed JSON-LD block");
                continue;
            }
        };
        if let Some(posting) = find_job_posting(&value) {
            return map_job_posting(posting);
        }
    }
    JobFields::default()
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s.eq_ignore_ascii_case(expected),
        Value::Array(arr) => arr.iter().any(|v| matches_type(v, expected)),
        _ => false,
    }
}

/// Depth-first search for an object whose `@type` is JobPosting.
fn find_job_posting(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => {
            if map.get("@type").is_some_and(|t| matches_type(t, "JobPosting")) {
                return Some(value);
            }
            if let Some(found) = map.get("@graph").and_then(find_job_posting) {
                return Some(found);
            }
            map.values().find_map(find_job_posting)
        }
        Value::Array(arr) => arr.iter().find_map(find_job_posting),
        _ => None,
    }
}

fn first_item(value: &Value) -> &Value {
    match value {
        Value::Array(arr) => arr.first().unwrap_or(&Value::Null),
        other => other,
    }
}

/// String values may carry HTML entities or tags; they are decoded to plain text.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(html_to_text(s)),
        Value::Object(map) => map.get("name").and_then(text_of),
        Value::Array(arr) => arr.iter().find_map(text_of),
        _ => None,
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Joins string or array-of-string values with spaces.
fn joined(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

fn map_job_posting(posting: &Value) -> JobFields {
    let mut fields = JobFields {
        position: posting.get("title").and_then(text_of),
        company_name: posting.get("hiringOrganization").and_then(text_of),
        location: posting.get("jobLocation").and_then(location_of),
        job_description: posting
            .get("description")
            .and_then(Value::as_str)
            .and_then(|d| non_empty(html_to_text(d))),
        employment_type: posting.get("employmentType").and_then(employment_type_of),
        work_type: posting.get("jobLocationType").and_then(work_type_of),
        ..Default::default()
    };

    if let Some(salary) = posting.get("baseSalary") {
        apply_base_salary(&mut fields, first_item(salary));
    }
    fields
}

fn location_of(job_location: &Value) -> Option<String> {
    match job_location {
        Value::Array(arr) => arr.iter().find_map(location_of),
        Value::Object(map) => {
            let address = map.get("address")?;
            if address.is_string() {
                return text_of(address);
            }
            ["addressLocality", "addressRegion", "addressCountry"]
                .iter()
                .find_map(|key| address.get(*key).and_then(text_of))
        }
        Value::String(_) => text_of(job_location),
        _ => None,
    }
}

fn employment_type_of(value: &Value) -> Option<EmploymentType> {
    let text = joined(value);
    detect_employment_type(&text).or_else(|| {
        text.to_ascii_uppercase()
            .contains("TEMPORARY")
            .then_some(EmploymentType::Contract)
    })
}

fn work_type_of(value: &Value) -> Option<WorkType> {
    let text = joined(value);
    if text.to_ascii_uppercase().contains("TELECOMMUTE") {
        Some(WorkType::Remote)
    } else {
        detect_work_type(&text)
    }
}

/// Maps a MonetaryAmount. `value` may be a number, a string, or a QuantitativeValue.
fn apply_base_salary(fields: &mut JobFields, salary: &Value) {
    let amount = salary.get("value").unwrap_or(&Value::Null);

    let currency = salary
        .get("currency")
        .or_else(|| amount.get("currency"))
        .and_then(Value::as_str)
        .and_then(|c| non_empty(c))
        .map(|c| c.to_ascii_uppercase());

    let unit = amount
        .get("unitText")
        .or_else(|| salary.get("unitText"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let scale = if unit.eq_ignore_ascii_case("HOUR") {
        HOURS_PER_YEAR
    } else {
        1.0
    };

    let (min, max) = match amount {
        Value::Object(_) => {
            let single = amount.get("value").and_then(number_of);
            let min = amount.get("minValue").and_then(number_of).or(single);
            let max = amount.get("maxValue").and_then(number_of).or(single);
            (min.or(max), max.or(min))
        }
        Value::String(s) if number_of(amount).is_none() => {
            let parsed = parse_salary(s);
            if !parsed.is_empty() {
                fields.salary_min = parsed.min;
                fields.salary_max = parsed.max;
                fields.salary_currency = currency.or(parsed.currency);
            }
            return;
        }
        other => {
            let single = number_of(other);
            (single, single)
        }
    };

    fields.salary_min = min.map(|v| v * scale);
    fields.salary_max = max.map(|v| v * scale);
    if fields.salary_min.is_some() {
        fields.salary_currency = currency;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use pretty_assertions::assert_eq;

    fn page(blocks: &[&str]) -> HtmlDocument {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        HtmlDocument::parse(&format!("<html><head>{scripts}</head><body></body></html>"))
    }

    #[test]
    fn maps_full_job_posting() {
        let doc = page(&[r#"{
            "@context": "https://schema.org",
            "@type": "JobPosting",
            "title": "Backend Engineer",
            "hiringOrganization": {"@type": "Organization", "name": "Acme"},
            "jobLocation": {"@type": "Place", "address": {"addressLocality": "Berlin", "addressCountry": "DE"}},
            "description": "<p>Build <strong>APIs</strong></p>",
            "baseSalary": {"@type": "MonetaryAmount", "currency": "EUR",
                           "value": {"@type": "QuantitativeValue", "minValue": 100000, "maxValue": 130000, "unitText": "YEAR"}},
            "employmentType": "FULL_TIME",
            "jobLocationType": "TELECOMMUTE"
        }"#]);

        let fields = extract_json_ld(&doc);
        assert_eq!(
            fields,
            JobFields {
                position: Some("Backend Engineer".into()),
                company_name: Some("Acme".into()),
                location: Some("Berlin".into()),
                work_type: Some(WorkType::Remote),
                employment_type: Some(EmploymentType::FullTime),
                salary_min: Some(100000.0),
                salary_max: Some(130000.0),
                salary_currency: Some("EUR".into()),
                job_description: Some("Build APIs".into()),
            }
        );
    }

    #[test]
    fn decodes_entities_in_text_fields() {
        let doc = page(&[r#"{"@type": "JobPosting",
            "title": "R&amp;D Engineer",
            "hiringOrganization": {"name": "Smith &amp; Co"},
            "jobLocation": {"address": "S&atilde;o Paulo"}}"#]);
        let fields = extract_json_ld(&doc);
        assert_eq!(fields.position.as_deref(), Some("R&D Engineer"));
        assert_eq!(fields.company_name.as_deref(), Some("Smith & Co"));
        assert_eq!(fields.location.as_deref(), Some("São Paulo"));
    }

    #[test]
    fn matches_script_type_with_parameters() {
        let doc = HtmlDocument::parse(
            r#"<html><head><script type="application/ld+json; charset=utf-8">
                {"@type": "JobPosting", "title": "Site Reliability Engineer"}
            </script></head></html>"#,
        );
        assert_eq!(
            extract_json_ld(&doc).position.as_deref(),
            Some("Site Reliability Engineer")
        );

        let doc = HtmlDocument::parse(
            r#"<script type="Application/LD+JSON">{"@type": "JobPosting", "title": "QA"}</script>"#,
        );
        assert_eq!(extract_json_ld(&doc).position.as_deref(), Some("QA"));
    }

    #[test]
    fn skips_malformed_block() {
        let doc = page(&[
            "{ this is not json",
            r#"{"@type": "JobPosting", "title": "Data Engineer"}"#,
        ]);
        assert_eq!(extract_json_ld(&doc).position.as_deref(), Some("Data Engineer"));
    }

    #[test]
    fn finds_posting_in_graph_and_arrays() {
        let doc = page(&[r#"{"@context": "https://schema.org", "@graph": [
            {"@type": "WebPage", "name": "Careers"},
            {"@type": ["Thing", "JobPosting"], "title": "SRE", "hiringOrganization": "Initech"}
        ]}"#]);
        let fields = extract_json_ld(&doc);
        assert_eq!(fields.position.as_deref(), Some("SRE"));
        assert_eq!(fields.company_name.as_deref(), Some("Initech"));

        let doc = page(&[r#"[{"@type": "Organization"}, {"@type": "JobPosting", "title": "QA"}]"#]);
        assert_eq!(extract_json_ld(&doc).position.as_deref(), Some("QA"));
    }

    #[test]
    fn scalar_salary_value() {
        let doc = page(&[r#"{"@type": "JobPosting",
            "baseSalary": {"currency": "USD", "value": "95000"}}"#]);
        let fields = extract_json_ld(&doc);
        assert_eq!(fields.salary_min, Some(95000.0));
        assert_eq!(fields.salary_max, Some(95000.0));
        assert_eq!(fields.salary_currency.as_deref(), Some("USD"));
    }

    #[test]
    fn hourly_salary_is_annualized() {
        let doc = page(&[r#"{"@type": "JobPosting",
            "baseSalary": {"currency": "USD", "value": {"value": 50, "unitText": "HOUR"}}}"#]);
        let fields = extract_json_ld(&doc);
        assert_eq!(fields.salary_min, Some(104000.0));
        assert_eq!(fields.salary_max, Some(104000.0));
    }

    #[test]
    fn free_text_salary_goes_through_normalizer() {
        let doc = page(&[r#"{"@type": "JobPosting", "baseSalary": {"value": "£60k - £70k"}}"#]);
        let fields = extract_json_ld(&doc);
        assert_eq!(fields.salary_min, Some(60000.0));
        assert_eq!(fields.salary_max, Some(70000.0));
        assert_eq!(fields.salary_currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn location_array_and_region_fallback() {
        let doc = page(&[r#"{"@type": "JobPosting", "jobLocation": [
            {"@type": "Place"},
            {"@type": "Place", "address": {"addressRegion": "CA", "addressCountry": {"name": "US"}}}
        ]}"#]);
        assert_eq!(extract_json_ld(&doc).location.as_deref(), Some("CA"));
    }

    #[test]
    fn employment_type_array_and_temporary() {
        let doc = page(&[r#"{"@type": "JobPosting", "employmentType": ["PART_TIME", "FULL_TIME"]}"#]);
        assert_eq!(
            extract_json_ld(&doc).employment_type,
            Some(EmploymentType::PartTime)
        );

        let doc = page(&[r#"{"@type": "JobPosting", "employmentType": "TEMPORARY"}"#]);
        assert_eq!(
            extract_json_ld(&doc).employment_type,
            Some(EmploymentType::Contract)
        );
    }

    #[test]
    fn no_job_posting_yields_empty() {
        let doc = page(&[r#"{"@type": "Organization", "name": "Acme"}"#]);
        assert!(extract_json_ld(&doc).is_empty());
    }

    #[test]
    fn parse_block_reports_parse_error() {
        let err = parse_block("{").unwrap_err();
        assert!(err.is_parse());
    }
}
