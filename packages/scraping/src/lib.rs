//! Product Listing Scraping & Extraction Library
//!
//! Turns third-party product-listing URLs (marketplaces, course
//! platforms, design-asset stores) into structured, typed product
//! records for downstream market analysis.
//!
//! # Design Philosophy
//!
//! - Sources are data, not class hierarchies: a flat registry of
//!   descriptors plus pure extraction functions
//! - Every operation returns a tagged success-or-failure value; batch
//!   callers never need per-item exception handling
//! - Page fetching is an injected capability behind a narrow trait; the
//!   pipeline never speaks HTTP or parses DOM itself
//! - Extraction is best-effort: unparseable fields degrade to empty,
//!   only transport and classification failures are errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use scraping::{ScraperConfig, ScrapeRequest, ScrapingAgent};
//!
//! let agent = ScrapingAgent::new(ScraperConfig::new(api_key))?;
//!
//! // One listing
//! let result = agent.scrape_product(&ScrapeRequest::new(url)).await;
//!
//! // Many listings, bounded concurrency, input order preserved
//! let results = agent.scrape_multiple_products(&requests).await;
//! ```
//!
//! # Modules
//!
//! - [`agent`] - The public facade and batch orchestrator
//! - [`sources`] - Source registry and URL classification
//! - [`parsing`] - Price, feature-list, and markdown heuristics
//! - [`extract`] - Fetched content → product record
//! - [`fetch`] / [`fetchers`] - The fetch adapter contract and its
//!   Firecrawl-backed implementation
//! - [`retry`] / [`limiter`] - Backoff policy and per-domain pacing
//! - [`testing`] - Scriptable mock fetcher for tests

pub mod agent;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod fetchers;
pub mod limiter;
pub mod parsing;
pub mod retry;
pub mod sources;
pub mod stats;
pub mod testing;
pub mod types;

// Re-export the public surface at crate root
pub use agent::ScrapingAgent;
pub use config::{ApiKey, ScraperConfig};
pub use error::{FetchError, FetchResult, ScrapeError};
pub use fetch::{ContentMetadata, FetchOptions, FetchedContent, Fetcher};
pub use fetchers::FirecrawlFetcher;
pub use limiter::DomainRateLimiter;
pub use retry::RetryPolicy;
pub use sources::{SourceDescriptor, SourceRegistry};
pub use stats::ScrapeStats;
pub use types::{
    BillingInterval, ErrorCode, Pricing, PricingKind, Priority, ProductCategory, ProductExtract,
    ScrapeFailure, ScrapeOptions, ScrapeRequest, ScrapeResult,
};

// Re-export testing utilities
pub use testing::{CallLog, MockFetchCall, MockFetcher};
