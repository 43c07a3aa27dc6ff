// ABOUTME: Keyword heuristics detecting work arrangement and employment type from arbitrary text.
// ABOUTME: Each rule table is checked in order and the first rule with a matching keyword wins.

use crate::record::{EmploymentType, WorkType};

/// Work-type rules in priority order. The bare "remote" rule is deliberately last.
const WORK_TYPE_RULES: &[(&[&str], WorkType)] = &[
    (
        &["fully remote", "100% remote", "work from home"],
        WorkType::Remote,
    ),
    (&["hybrid", "flexible"], WorkType::Hybrid),
    (&["on-site", "onsite", "in-office"], WorkType::Onsite),
    (&["remote"], WorkType::Remote),
];

const EMPLOYMENT_TYPE_RULES: &[(&[&str], EmploymentType)] = &[
    (&["intern", "internship"], EmploymentType::Internship),
    (
        &["contract", "contractor", "freelance"],
        EmploymentType::Contract,
    ),
    (&["part-time", "part time"], EmploymentType::PartTime),
    (
        &["full-time", "full time", "permanent"],
        EmploymentType::FullTime,
    ),
];

/// Lower-cases and reads schema.org style underscores (`FULL_TIME`) as spaces.
fn fold(text: &str) -> String {
    text.to_lowercase().replace('_', " ")
}

fn first_match<T: Copy>(text: &str, rules: &[(&[&str], T)]) -> Option<T> {
    let folded = fold(text);
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| folded.contains(k)))
        .map(|(_, value)| *value)
}

/// Detects the work arrangement mentioned in `text`.
pub fn detect_work_type(text: &str) -> Option<WorkType> {
    first_match(text, WORK_TYPE_RULES)
}

/// Detects the employment type mentioned in `text`.
pub fn detect_employment_type(text: &str) -> Option<EmploymentType> {
    first_match(text, EMPLOYMENT_TYPE_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hybrid_with_flexible_hours() {
        assert_eq!(
            detect_work_type("This is a hybrid role with flexible hours"),
            Some(WorkType::Hybrid)
        );
    }

    #[test]
    fn explicit_remote_beats_hybrid() {
        assert_eq!(
            detect_work_type("Fully remote, occasional hybrid meetups"),
            Some(WorkType::Remote)
        );
    }

    #[test]
    fn bare_remote_checked_after_onsite() {
        assert_eq!(
            detect_work_type("On-site in Austin, remote Fridays"),
            Some(WorkType::Onsite)
        );
        assert_eq!(detect_work_type("Remote (US)"), Some(WorkType::Remote));
    }

    #[test]
    fn no_work_type_keyword() {
        assert_eq!(detect_work_type("Senior Backend Engineer"), None);
    }

    #[test]
    fn contract_position() {
        assert_eq!(
            detect_employment_type("6-month contract position"),
            Some(EmploymentType::Contract)
        );
    }

    #[test]
    fn schema_org_enums() {
        assert_eq!(
            detect_employment_type("FULL_TIME"),
            Some(EmploymentType::FullTime)
        );
        assert_eq!(
            detect_employment_type("PART_TIME"),
            Some(EmploymentType::PartTime)
        );
        assert_eq!(
            detect_employment_type("CONTRACTOR"),
            Some(EmploymentType::Contract)
        );
        assert_eq!(
            detect_employment_type("INTERN"),
            Some(EmploymentType::Internship)
        );
    }

    #[test]
    fn internship_outranks_full_time() {
        assert_eq!(
            detect_employment_type("Full-time summer internship"),
            Some(EmploymentType::Internship)
        );
    }

    #[test]
    fn permanent_is_full_time() {
        assert_eq!(
            detect_employment_type("Permanent role"),
            Some(EmploymentType::FullTime)
        );
        assert_eq!(detect_employment_type("Great team"), None);
    }
}
