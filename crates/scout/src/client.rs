// ABOUTME: The main Client struct for scout that runs the extraction pipeline for job posting URLs.
// ABOUTME: Provides async extract() over the network and sync extract_html()/extract_document() over pages already in hand.

use futures::stream::{self, StreamExt};
use tracing::debug;
use url::Url;

use crate::classify::{detect_employment_type, detect_work_type};
use crate::dom::compiled::precompile_selectors;
use crate::dom::{HtmlDocument, Queryable};
use crate::error::{ErrorCode, ExtractError};
use crate::extractors::patterns::{builtin_registry, PatternRegistry, SitePattern};
use crate::extractors::selectors::{
    extract_by_selectors, GENERIC_COMPANY_SELECTORS, GENERIC_DESCRIPTION_SELECTORS,
    GENERIC_LOCATION_SELECTORS, GENERIC_POSITION_SELECTORS,
};
use crate::extractors::structured::extract_from_meta;
use crate::formats::{collapse_whitespace, truncate_chars};
use crate::options::{ClientBuilder, Options};
use crate::posting_url::is_likely_job_posting_in;
use crate::record::{non_empty, ExtractedRecord, JobFields};
use crate::resource::{validate_url, FetchOptions, Fetcher};

/// Progress of one extraction run, emitted as debug events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    ExtractingStructured,
    ExtractingSelectors,
    Normalizing,
    Done,
    Failed(ErrorCode),
}

/// Display name for the record's `source`: the board name, else the bare host.
fn source_name(url: &Url, pattern: Option<&SitePattern>) -> String {
    match pattern {
        Some(p) => p.display_name.clone(),
        None => {
            let host = url.host_str().unwrap_or_default();
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
    }
}

/// Fills work and employment type from the text gathered so far, if still unknown.
fn classify_remaining(fields: &mut JobFields) {
    if fields.work_type.is_some() && fields.employment_type.is_some() {
        return;
    }
    let text = [
        fields.position.as_deref(),
        fields.location.as_deref(),
        fields.job_description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    if fields.work_type.is_none() {
        fields.work_type = detect_work_type(&text);
    }
    if fields.employment_type.is_none() {
        fields.employment_type = detect_employment_type(&text);
    }
}

/// The main scout client for extracting job postings.
pub struct Client {
    opts: Options,
    fetcher: Fetcher,
    registry: PatternRegistry,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        let registry = opts
            .registry
            .clone()
            .unwrap_or_else(|| builtin_registry().clone());
        precompile_selectors(registry.iter().flat_map(|p| p.selectors.iter()));
        precompile_selectors(
            GENERIC_POSITION_SELECTORS
                .iter()
                .chain(GENERIC_COMPANY_SELECTORS)
                .chain(GENERIC_LOCATION_SELECTORS)
                .chain(GENERIC_DESCRIPTION_SELECTORS),
        );

        let fetch_opts = FetchOptions {
            headers: opts.headers.clone(),
            accept: opts.accept.clone(),
            timeout: opts.timeout,
        };
        let fetcher = Fetcher::new(
            http_client,
            fetch_opts,
            opts.proxies.clone(),
            opts.proxy_strategy,
        );

        Self {
            opts,
            fetcher,
            registry,
        }
    }

    /// Offline job-posting check against this client's registry.
    pub fn is_likely_job_posting(&self, url: &str) -> bool {
        is_likely_job_posting_in(url, &self.registry)
    }

    /// Fetch a job posting and extract its fields.
    ///
    /// Only an invalid URL is an error. When every fetch attempt fails the
    /// record is returned degraded, carrying just `job_url` and `source`.
    #[tracing::instrument(name = "extract", skip(self))]
    pub async fn extract(&self, url: &str) -> Result<ExtractedRecord, ExtractError> {
        debug!(stage = ?Stage::Validating);
        let parsed = self.validate(url, "Extract")?;
        let source = source_name(&parsed, self.registry.find_for_url(&parsed));

        debug!(stage = ?Stage::Fetching);
        let html = match self.fetcher.fetch_html(url).await {
            Ok(html) => html,
            Err(err) => {
                debug!(error = %err, "fetch failed, returning degraded record");
                return Ok(ExtractedRecord::degraded(url, source));
            }
        };

        Ok(self.extract_parsed(&html, url, &parsed))
    }

    /// Extract from HTML that is already in hand. `url` identifies the page.
    pub fn extract_html(&self, html: &str, url: &str) -> Result<ExtractedRecord, ExtractError> {
        let parsed = self.validate(url, "ExtractHtml")?;
        Ok(self.extract_parsed(html, url, &parsed))
    }

    /// Extract from any [`Queryable`] document.
    pub fn extract_document(
        &self,
        doc: &dyn Queryable,
        url: &str,
    ) -> Result<ExtractedRecord, ExtractError> {
        let parsed = self.validate(url, "ExtractDocument")?;
        Ok(self.run_passes(doc, url, &parsed))
    }

    /// Extract many URLs, `concurrency` at a time. Results keep input order.
    pub async fn extract_all<S: AsRef<str>>(
        &self,
        urls: &[S],
    ) -> Vec<Result<ExtractedRecord, ExtractError>> {
        stream::iter(urls)
            .map(|url| self.extract(url.as_ref()))
            .buffered(self.opts.concurrency.max(1))
            .collect()
            .await
    }

    fn validate(&self, url: &str, op: &str) -> Result<Url, ExtractError> {
        validate_url(url, op).inspect_err(|err| {
            debug!(stage = ?Stage::Failed(err.code), error = %err);
        })
    }

    // The parsed document is not Send, so it stays inside this sync call.
    fn extract_parsed(&self, html: &str, url: &str, parsed: &Url) -> ExtractedRecord {
        let doc = HtmlDocument::parse(html);
        self.run_passes(&doc, url, parsed)
    }

    fn run_passes(&self, doc: &dyn Queryable, url: &str, parsed: &Url) -> ExtractedRecord {
        let pattern = self.registry.find_for_url(parsed);
        let source = source_name(parsed, pattern);

        debug!(stage = ?Stage::ExtractingStructured);
        let structured = extract_from_meta(doc);

        debug!(stage = ?Stage::ExtractingSelectors, pattern = pattern.map(|p| p.domain.as_str()));
        let selected = extract_by_selectors(doc, pattern);

        let mut fields = JobFields::merge_all([structured, selected]);

        debug!(stage = ?Stage::Normalizing);
        classify_remaining(&mut fields);
        fields.job_description = fields.job_description.take().and_then(|d| {
            non_empty(truncate_chars(
                &collapse_whitespace(&d),
                self.opts.max_description_len,
            ))
        });

        debug!(stage = ?Stage::Done);
        ExtractedRecord {
            job_url: url.to_string(),
            source,
            fields,
        }
    }
}
