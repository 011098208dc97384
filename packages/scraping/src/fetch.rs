//! Fetch adapter contract.
//!
//! The pipeline consumes page content through this narrow interface and
//! never speaks HTTP or parses DOM itself. Implementations live in
//! [`crate::fetchers`]; tests use the scriptable mock in
//! [`crate::testing`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::FetchResult;
use crate::types::request::ScrapeOptions;

/// Page metadata reported by the fetch service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// Raw content for one fetched page. Ephemeral: consumed synchronously by
/// the extraction engine and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedContent {
    /// Markdown rendering of the page
    pub markdown: String,

    /// Raw HTML, when the request asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Service-reported page metadata
    #[serde(default)]
    pub metadata: ContentMetadata,

    /// When the content was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedContent {
    /// Create content with markdown only.
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            html: None,
            metadata: ContentMetadata::default(),
            fetched_at: Utc::now(),
        }
    }

    /// Attach raw HTML.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Set the page description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }
}

/// Per-fetch options handed to the adapter.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Content formats to request (e.g. "markdown", "html")
    pub formats: Vec<String>,

    /// Strip navigation and boilerplate server-side
    pub only_main_content: bool,

    /// Time budget for the attempt
    pub timeout: Duration,
}

impl FetchOptions {
    /// Derive adapter options from a request's scrape options.
    pub fn for_request(options: &ScrapeOptions, timeout: Duration) -> Self {
        let mut formats = vec!["markdown".to_string()];
        if options.include_images {
            formats.push("html".to_string());
        }
        Self {
            formats,
            only_main_content: options.extract_content,
            timeout,
        }
    }
}

/// The external capability that retrieves raw page content for a URL.
///
/// One call is one attempt: retries, backoff, and pacing are the
/// pipeline's concern, not the adapter's.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one page.
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult<FetchedContent>;

    /// Adapter name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
