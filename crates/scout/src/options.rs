// ABOUTME: Configuration options for the scout client, plus the fluent ClientBuilder.
// ABOUTME: Covers fetch timeouts, request headers, the proxy list and strategy, and output limits.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::extractors::patterns::PatternRegistry;
use crate::resource::{default_proxies, ProxyEndpoint, ProxyStrategy, DEFAULT_ACCEPT};

/// Desktop-browser User-Agent. Several job boards refuse obvious bot agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 5000;

/// Configuration options for the scout client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Bound on each individual fetch attempt (direct or proxied).
    pub timeout: Duration,
    pub user_agent: String,
    pub accept: String,
    pub headers: HashMap<String, String>,
    pub proxies: Vec<ProxyEndpoint>,
    pub proxy_strategy: ProxyStrategy,
    /// Maximum characters kept in `jobDescription`.
    pub max_description_len: usize,
    /// Parallel extractions in `Client::extract_all`.
    pub concurrency: usize,
    pub http_client: Option<reqwest::Client>,
    pub registry: Option<PatternRegistry>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            headers: HashMap::new(),
            proxies: default_proxies(),
            proxy_strategy: ProxyStrategy::Sequential,
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            concurrency: 4,
            http_client: None,
            registry: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.opts.accept = accept.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Replace the proxy list. An empty list disables proxy fallback.
    pub fn proxies(mut self, proxies: Vec<ProxyEndpoint>) -> Self {
        self.opts.proxies = proxies;
        self
    }

    /// Append one proxy template (must contain `{url}`).
    pub fn proxy(mut self, template: impl Into<String>) -> Self {
        self.opts.proxies.push(ProxyEndpoint::new(template));
        self
    }

    pub fn proxy_strategy(mut self, strategy: ProxyStrategy) -> Self {
        self.opts.proxy_strategy = strategy;
        self
    }

    pub fn max_description_len(mut self, len: usize) -> Self {
        self.opts.max_description_len = len;
        self
    }

    /// Set how many extractions `extract_all` runs at once. Zero is treated as one.
    pub fn concurrency(mut self, n: usize) -> Self {
        self.opts.concurrency = n.max(1);
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Set a custom site pattern registry.
    pub fn registry(mut self, reg: PatternRegistry) -> Self {
        self.opts.registry = Some(reg);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
