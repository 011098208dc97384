//! Agent construction configuration.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use std::time::Duration;

/// Fetch-service API key held in secure memory.
///
/// Backed by `secrecy` so the key never leaks through `Debug`, `Display`,
/// or error formatting.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Wrap a key value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Construction parameters for a [`crate::agent::ScrapingAgent`].
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Credential for the external fetch service
    pub fetch_api_key: ApiKey,

    /// Per-attempt time budget
    pub default_timeout: Duration,

    /// Additional attempts after the first failure
    pub max_retries: u32,

    /// Pace requests per source domain
    pub respect_rate_limit: bool,

    /// Sustained per-domain request rate (per second)
    pub requests_per_second: u32,

    /// Per-domain burst allowance
    pub burst: u32,

    /// Worker-pool size for batch scrapes
    pub max_concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            fetch_api_key: ApiKey::new(""),
            default_timeout: Duration::from_secs(30),
            max_retries: 3,
            respect_rate_limit: true,
            requests_per_second: 2,
            burst: 4,
            max_concurrency: 5,
        }
    }
}

impl ScraperConfig {
    /// Config with the given fetch-service key and defaults elsewhere.
    pub fn new(fetch_api_key: impl Into<ApiKey>) -> Self {
        Self {
            fetch_api_key: fetch_api_key.into(),
            ..Self::default()
        }
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Disable per-domain pacing.
    pub fn without_rate_limit(mut self) -> Self {
        self.respect_rate_limit = false;
        self
    }

    /// Set the per-domain quota.
    pub fn with_quota(mut self, requests_per_second: u32, burst: u32) -> Self {
        self.requests_per_second = requests_per_second;
        self.burst = burst;
        self
    }

    /// Set the batch worker-pool size.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}
