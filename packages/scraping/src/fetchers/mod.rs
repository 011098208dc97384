//! Fetch adapter implementations.

pub mod firecrawl;

pub use firecrawl::FirecrawlFetcher;
