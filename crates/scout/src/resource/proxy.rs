// ABOUTME: Fetch chain with proxy fallback: a direct attempt, then each configured proxy endpoint.
// ABOUTME: Proxies run in list order (Sequential) or all at once with the first success winning (Race).

use futures::future::{select_ok, BoxFuture, FutureExt};
use tracing::{debug, warn};
use url::Url;

use super::{fetch, validate_url, FetchOptions};
use crate::error::ExtractError;

/// Placeholder replaced by the percent-encoded target URL.
pub const URL_PLACEHOLDER: &str = "{url}";

const DEFAULT_PROXY_TEMPLATES: &[&str] = &[
    "https://api.allorigins.win/raw?url={url}",
    "https://corsproxy.io/?url={url}",
    "https://api.codetabs.com/v1/proxy?quest={url}",
];

/// How proxy endpoints are attempted after the direct request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyStrategy {
    /// One at a time, in list order.
    #[default]
    Sequential,
    /// All at once; the first successful response wins.
    Race,
}

/// A proxy URL template such as `https://proxy.example/raw?url={url}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub name: String,
    pub template: String,
}

impl ProxyEndpoint {
    /// Creates an endpoint, naming it after the template's host.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let name = Url::parse(&template.replace(URL_PLACEHOLDER, ""))
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| template.clone());
        Self { name, template }
    }

    /// Builds the request URL for `target`.
    pub fn build(&self, target: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.template.replace(URL_PLACEHOLDER, &encoded)
    }
}

/// The builtin public proxy list.
pub fn default_proxies() -> Vec<ProxyEndpoint> {
    DEFAULT_PROXY_TEMPLATES
        .iter()
        .map(|t| ProxyEndpoint::new(*t))
        .collect()
}

/// Fetches raw HTML for a URL, falling back through proxies.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    opts: FetchOptions,
    proxies: Vec<ProxyEndpoint>,
    strategy: ProxyStrategy,
}

impl Fetcher {
    pub fn new(
        client: reqwest::Client,
        opts: FetchOptions,
        proxies: Vec<ProxyEndpoint>,
        strategy: ProxyStrategy,
    ) -> Self {
        Self {
            client,
            opts,
            proxies,
            strategy,
        }
    }

    /// Returns the page body, trying the direct URL first and then each proxy.
    ///
    /// Fails with `InvalidUrl` before any request when `url` is not an absolute
    /// http(s) URL, and with `Fetch` (wrapping the last attempt's error) when
    /// every attempt fails.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ExtractError> {
        validate_url(url, "FetchHtml")?;

        let direct_err = match fetch(&self.client, url, &self.opts).await {
            Ok(result) => {
                if result.final_url != url {
                    debug!(url, final_url = %result.final_url, "followed redirect");
                }
                return Ok(result.text());
            }
            Err(err) => err,
        };
        debug!(url, error = %direct_err, "direct fetch failed");

        if self.proxies.is_empty() {
            return Err(self.exhausted(url, direct_err));
        }

        let outcome = match self.strategy {
            ProxyStrategy::Sequential => self.sequential(url).await,
            ProxyStrategy::Race => self.race(url).await,
        };

        outcome.map_err(|last| self.exhausted(url, last))
    }

    async fn sequential(&self, url: &str) -> Result<String, ExtractError> {
        let mut last_err = None;
        for proxy in &self.proxies {
            match self.attempt(proxy, url).await {
                Ok(body) => return Ok(body),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| ExtractError::fetch(url, "FetchHtml", None)))
    }

    async fn race(&self, url: &str) -> Result<String, ExtractError> {
        let attempts: Vec<BoxFuture<'_, Result<String, ExtractError>>> = self
            .proxies
            .iter()
            .map(|proxy| self.attempt(proxy, url).boxed())
            .collect();

        // select_ok hands back the error of the last attempt to finish.
        select_ok(attempts).await.map(|(body, _rest)| body)
    }

    async fn attempt(&self, proxy: &ProxyEndpoint, url: &str) -> Result<String, ExtractError> {
        let proxied = proxy.build(url);
        match fetch(&self.client, &proxied, &self.opts).await {
            Ok(result) => {
                debug!(url, proxy = %proxy.name, "fetched through proxy");
                Ok(result.text())
            }
            Err(err) => {
                debug!(url, proxy = %proxy.name, error = %err, "proxy attempt failed");
                Err(err)
            }
        }
    }

    fn exhausted(&self, url: &str, last: ExtractError) -> ExtractError {
        warn!(url, attempts = self.proxies.len() + 1, "all fetch attempts failed");
        ExtractError::fetch(url, "FetchHtml", Some(anyhow::Error::new(last)))
    }
}
