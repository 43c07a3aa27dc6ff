// ABOUTME: Record types produced by an extraction run: JobFields, ExtractedRecord and the classification enums.
// ABOUTME: JobFields carries the never-overwrite merge used to fold extraction passes together.

use serde::{Deserialize, Serialize};

/// Work arrangement of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    Hybrid,
    Onsite,
}

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// Job fields recovered by one extraction pass, or the accumulation of several.
///
/// Text fields are never `Some("")`; use [`non_empty`] when building them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl JobFields {
    /// Fills every empty field from `other`. Populated fields are never touched.
    pub fn fill_from(&mut self, other: JobFields) {
        fill(&mut self.position, other.position);
        fill(&mut self.company_name, other.company_name);
        fill(&mut self.location, other.location);
        fill(&mut self.work_type, other.work_type);
        fill(&mut self.employment_type, other.employment_type);
        fill(&mut self.salary_min, other.salary_min);
        fill(&mut self.salary_max, other.salary_max);
        fill(&mut self.salary_currency, other.salary_currency);
        fill(&mut self.job_description, other.job_description);
    }

    /// Replaces fields with every populated field of `other`.
    ///
    /// Only the structured-data pass uses this, to let JSON-LD win over meta tags.
    pub fn overlay(&mut self, other: JobFields) {
        replace(&mut self.position, other.position);
        replace(&mut self.company_name, other.company_name);
        replace(&mut self.location, other.location);
        replace(&mut self.work_type, other.work_type);
        replace(&mut self.employment_type, other.employment_type);
        replace(&mut self.salary_min, other.salary_min);
        replace(&mut self.salary_max, other.salary_max);
        replace(&mut self.salary_currency, other.salary_currency);
        replace(&mut self.job_description, other.job_description);
    }

    /// Folds passes in precedence order with never-overwrite semantics.
    pub fn merge_all<I>(passes: I) -> JobFields
    where
        I: IntoIterator<Item = JobFields>,
    {
        passes.into_iter().fold(JobFields::default(), |mut acc, pass| {
            acc.fill_from(pass);
            acc
        })
    }

    /// Returns true if no field is populated.
    pub fn is_empty(&self) -> bool {
        *self == JobFields::default()
    }
}

/// Returns `Some(trimmed)` unless the string is blank.
pub fn non_empty(s: impl AsRef<str>) -> Option<String> {
    let trimmed = s.as_ref().trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The structured record returned for one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    pub job_url: String,
    pub source: String,
    #[serde(flatten)]
    pub fields: JobFields,
}

impl ExtractedRecord {
    /// A record with nothing but its identity, returned when the page could not be fetched.
    pub fn degraded(job_url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            job_url: job_url.into(),
            source: source.into(),
            fields: JobFields::default(),
        }
    }
}
