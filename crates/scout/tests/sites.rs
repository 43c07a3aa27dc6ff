// ABOUTME: Fixture tests running saved job board pages through the full extraction pipeline.
// ABOUTME: Each fixture exercises one site pattern plus the classification and salary passes.

use jobtrack_scout::{Client, EmploymentType, ExtractedRecord, WorkType};
use pretty_assertions::assert_eq;
use std::fs;

/// Load an HTML snapshot from the fixtures directory.
fn load_html_fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/fixtures/html/{}.html",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read HTML fixture {}: {}", path, e))
}

fn extract_fixture(name: &str, url: &str) -> ExtractedRecord {
    let client = Client::builder().proxies(Vec::new()).build();
    client
        .extract_html(&load_html_fixture(name), url)
        .expect("fixture URL is valid")
}

#[test]
fn greenhouse_posting() {
    let url = "https://boards.greenhouse.io/acmerobotics/jobs/4012345";
    let record = extract_fixture("greenhouse", url);

    assert_eq!(record.job_url, url);
    assert_eq!(record.source, "Greenhouse");
    assert_eq!(record.fields.position.as_deref(), Some("Senior Backend Engineer"));
    assert_eq!(record.fields.company_name.as_deref(), Some("Acme Robotics"));
    assert_eq!(
        record.fields.location.as_deref(),
        Some("San Francisco, CA (Hybrid)")
    );
    assert_eq!(record.fields.salary_min, Some(150000.0));
    assert_eq!(record.fields.salary_max, Some(190000.0));
    assert_eq!(record.fields.salary_currency.as_deref(), Some("USD"));
    assert_eq!(record.fields.work_type, Some(WorkType::Hybrid));
    assert_eq!(record.fields.employment_type, Some(EmploymentType::FullTime));

    let description = record.fields.job_description.unwrap();
    assert!(description.starts_with("About Acme Robotics Acme Robotics builds"));
    assert!(!description.contains('\n'));
}

#[test]
fn lever_posting() {
    let url = "https://jobs.lever.co/globex/6f1c2a3b-platform-engineer";
    let record = extract_fixture("lever", url);

    assert_eq!(record.source, "Lever");
    assert_eq!(record.fields.position.as_deref(), Some("Platform Engineer"));
    assert_eq!(record.fields.company_name.as_deref(), Some("Globex"));
    assert_eq!(record.fields.location.as_deref(), Some("Remote - Canada"));
    assert_eq!(record.fields.salary_min, Some(110000.0));
    assert_eq!(record.fields.salary_max, Some(130000.0));
    assert_eq!(record.fields.salary_currency.as_deref(), Some("CAD"));
    assert_eq!(record.fields.work_type, Some(WorkType::Remote));
    assert_eq!(record.fields.employment_type, Some(EmploymentType::Contract));
    assert_eq!(
        record.fields.job_description.as_deref(),
        Some(
            "Globex is hiring a platform engineer to scale our build farm. \
             This is a six month contract position."
        )
    );
}

#[test]
fn indeed_posting_mixes_json_ld_and_selectors() {
    let url = "https://www.indeed.com/viewjob?jk=0a1b2c3d4e5f";
    let record = extract_fixture("indeed", url);

    assert_eq!(record.source, "Indeed");
    assert_eq!(record.fields.position.as_deref(), Some("Barista"));
    assert_eq!(record.fields.company_name.as_deref(), Some("Bean There Cafe"));
    assert_eq!(record.fields.location.as_deref(), Some("Austin, TX 78701"));
    // $18 - $22 an hour, annualized over 2080 hours.
    assert_eq!(record.fields.salary_min, Some(37440.0));
    assert_eq!(record.fields.salary_max, Some(45760.0));
    assert_eq!(record.fields.salary_currency.as_deref(), Some("USD"));
    // From JSON-LD, not the page text.
    assert_eq!(record.fields.employment_type, Some(EmploymentType::PartTime));
    assert_eq!(record.fields.work_type, Some(WorkType::Onsite));
}

#[test]
fn same_html_on_unknown_host_uses_generic_selectors() {
    let record = extract_fixture("greenhouse", "https://careers.acme-robotics.example/jobs/1");

    assert_eq!(record.source, "careers.acme-robotics.example");
    // Generic h1 still finds the title, but no pattern means no salary.
    assert_eq!(record.fields.position.as_deref(), Some("Senior Backend Engineer"));
    assert_eq!(record.fields.salary_min, None);
    assert_eq!(record.fields.salary_currency, None);
}

#[test]
fn record_serializes_with_camel_case_keys() {
    let record = extract_fixture("lever", "https://jobs.lever.co/globex/1");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["jobUrl"], "https://jobs.lever.co/globex/1");
    assert_eq!(json["companyName"], "Globex");
    assert_eq!(json["workType"], "remote");
    assert_eq!(json["employmentType"], "contract");
    assert_eq!(json["salaryCurrency"], "CAD");
    assert!(json.get("salary_min").is_none());
}
