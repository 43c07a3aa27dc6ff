// ABOUTME: Main library entry point for the scout job-posting extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, ExtractedRecord, JobFields, ExtractError, Options.

//! Scout - structured data extraction for job posting pages.
//!
//! Given a job posting URL, scout fetches the page (falling back through
//! public CORS proxies when the board blocks direct requests) and recovers
//! the position, company, location, work arrangement, employment type,
//! salary range and description. Fields come from schema.org JSON-LD,
//! Open Graph meta tags, site-specific selectors for the major job boards,
//! and generic selectors, in that order of precedence.
//!
//! # Example
//!
//! ```no_run
//! use jobtrack_scout::{Client, ExtractError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = Client::builder().build();
//!     let record = client
//!         .extract("https://boards.greenhouse.io/acme/jobs/123")
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&record).unwrap());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod formats;
pub mod options;
pub mod posting_url;
pub mod record;
pub mod resource;
pub mod salary;

pub use crate::client::{Client, Stage};
pub use crate::dom::{HtmlDocument, Queryable};
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::patterns::{
    builtin_registry, load_builtin_registry, PatternRegistry, PatternSelectors, SitePattern,
};
pub use crate::options::{ClientBuilder, Options};
pub use crate::posting_url::is_likely_job_posting;
pub use crate::record::{EmploymentType, ExtractedRecord, JobFields, WorkType};
pub use crate::resource::{ProxyEndpoint, ProxyStrategy};
pub use crate::salary::{parse_salary, ParsedSalary};
