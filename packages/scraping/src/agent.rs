//! Public facade: the scraping agent.
//!
//! One agent owns the source registry, the fetch adapter, the retry
//! policy, the per-domain rate limiter, and the usage counters. Each
//! request walks Validating → (rate-limit wait) → Fetching →
//! Extracting; rejections and exhausted retries land in the same
//! uniform [`ScrapeResult`] payload instead of raising.

use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::{FetchError, FetchResult, ScrapeError};
use crate::extract::extract_product;
use crate::fetch::{FetchOptions, FetchedContent, Fetcher};
use crate::fetchers::FirecrawlFetcher;
use crate::limiter::DomainRateLimiter;
use crate::parsing::PricingParser;
use crate::retry::RetryPolicy;
use crate::sources::{classifier, SourceDescriptor, SourceRegistry};
use crate::stats::{ScrapeStats, StatsTracker};
use crate::types::product::ProductExtract;
use crate::types::request::ScrapeRequest;
use crate::types::result::ScrapeResult;

/// Scraping agent generic over its fetch adapter.
pub struct ScrapingAgent<F: Fetcher> {
    config: ScraperConfig,
    fetcher: F,
    registry: SourceRegistry,
    retry: RetryPolicy,
    limiter: DomainRateLimiter,
    stats: StatsTracker,
    pricing: PricingParser,
}

impl ScrapingAgent<FirecrawlFetcher> {
    /// Agent backed by the production fetch service, configured from
    /// `config.fetch_api_key`.
    pub fn new(config: ScraperConfig) -> FetchResult<Self> {
        let fetcher = FirecrawlFetcher::new(config.fetch_api_key.clone())?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetcher> ScrapingAgent<F> {
    /// Agent with an injected fetch adapter.
    pub fn with_fetcher(config: ScraperConfig, fetcher: F) -> Self {
        let limiter = if config.respect_rate_limit {
            DomainRateLimiter::new(config.requests_per_second, config.burst)
        } else {
            DomainRateLimiter::disabled()
        };

        let retry = RetryPolicy::with_max_retries(config.max_retries);

        Self {
            config,
            fetcher,
            registry: SourceRegistry::builtin(),
            retry,
            limiter,
            stats: StatsTracker::new(),
            pricing: PricingParser::new(),
        }
    }

    /// Replace the source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the retry policy (timing overrides for tests and tuning).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Whether a URL names a recognized source.
    pub fn is_url_supported(&self, url: &str) -> bool {
        classifier::is_url_supported(&self.registry, url)
    }

    /// Read-only registry snapshot, keyed by source id.
    pub fn supported_sources(
        &self,
    ) -> indexmap::IndexMap<String, SourceDescriptor> {
        self.registry.supported_sources()
    }

    /// Snapshot of the usage counters.
    pub fn stats(&self) -> ScrapeStats {
        self.stats.snapshot()
    }

    /// Zero the usage counters. In-flight scrapes still record their
    /// outcome on completion.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Scrape one product listing. Never panics and never returns `Err`;
    /// every outcome is folded into the result payload.
    pub async fn scrape_product(&self, request: &ScrapeRequest) -> ScrapeResult {
        match self.run_pipeline(request).await {
            Ok(product) => {
                self.stats.record_success();
                info!(url = %request.url, source = %product.source, "scrape succeeded");
                ScrapeResult::ok(product)
            }
            Err(err) => {
                self.stats.record_failure();
                warn!(url = %request.url, error = %err, "scrape failed");
                ScrapeResult::failure(&err)
            }
        }
    }

    /// Scrape many listings under a bounded worker pool.
    ///
    /// Output order matches input order regardless of completion order,
    /// and a failing item never aborts its siblings.
    pub async fn scrape_multiple_products(&self, requests: &[ScrapeRequest]) -> Vec<ScrapeResult> {
        let pool = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        info!(
            count = requests.len(),
            concurrency = self.config.max_concurrency,
            "starting batch scrape"
        );

        let scrapes = requests.iter().map(|request| {
            let pool = pool.clone();
            async move {
                let _permit = pool.acquire().await.expect("worker pool closed");
                self.scrape_product(request).await
            }
        });

        join_all(scrapes).await
    }

    /// Generic entry point. A JSON string is treated as a URL and
    /// delegated to [`Self::scrape_product`]; any other input type is
    /// rejected before classification or network activity with the
    /// distinct invalid-input error, and is not counted in stats.
    pub async fn process(&self, input: &Value) -> ScrapeResult {
        match input {
            Value::String(url) => self.scrape_product(&ScrapeRequest::new(url)).await,
            other => {
                let err = ScrapeError::InvalidInput {
                    reason: format!("expected a URL string, got {}", json_type_name(other)),
                };
                warn!(error = %err, "rejected non-URL input");
                ScrapeResult::failure(&err)
            }
        }
    }

    async fn run_pipeline(&self, request: &ScrapeRequest) -> Result<ProductExtract, ScrapeError> {
        let (source, url) = classifier::classify(&self.registry, &request.url)?;
        let domain = url.host_str().unwrap_or_default().to_ascii_lowercase();
        debug!(url = %request.url, source = %source.id, "classified request");

        self.limiter.acquire(&domain).await;

        let options = FetchOptions::for_request(&request.options, self.config.default_timeout);
        let content = self.fetch_with_retry(&request.url, &options).await?;

        Ok(extract_product(
            &self.pricing,
            &content,
            source,
            &request.options,
            &request.url,
        ))
    }

    /// One logical fetch: up to `max_retries + 1` attempts with
    /// exponential backoff between failures.
    async fn fetch_with_retry(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<FetchedContent, ScrapeError> {
        let mut last_failure = String::new();

        for attempt in 1..=self.retry.total_attempts() {
            let outcome = tokio::time::timeout(options.timeout, self.fetcher.fetch(url, options));

            match outcome.await {
                Ok(Ok(content)) => {
                    debug!(url = %url, attempt, "fetch succeeded");
                    return Ok(content);
                }
                Ok(Err(err)) => {
                    last_failure = err.to_string();
                }
                Err(_) => {
                    last_failure = FetchError::Timeout {
                        url: url.to_string(),
                    }
                    .to_string();
                }
            }

            if self.retry.should_retry(attempt) {
                let backoff = self.retry.backoff_for(attempt);
                debug!(
                    url = %url,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    failure = %last_failure,
                    "fetch attempt failed, backing off"
                );
                tokio::time::sleep(backoff).await;
            }
        }

        Err(ScrapeError::RetriesExhausted {
            attempts: self.retry.total_attempts(),
            reason: last_failure,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
