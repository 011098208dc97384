//! Scrape request types.

use serde::{Deserialize, Serialize};

/// Options controlling what a scrape extracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOptions {
    /// Collect image URLs from the fetched content
    #[serde(default)]
    pub include_images: bool,

    /// Ask the fetch service for page metadata (title, description)
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Ask the fetch service to strip navigation/boilerplate
    #[serde(default = "default_true")]
    pub extract_content: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            include_images: false,
            include_metadata: true,
            extract_content: true,
        }
    }
}

/// Request priority. Only normal priority is defined today; the field
/// exists so callers and stored requests stay forward-compatible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
}

/// A single scrape request. Created per call by the caller; immutable;
/// not persisted by this library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Target product-listing URL
    pub url: String,

    /// Extraction options
    #[serde(default)]
    pub options: ScrapeOptions,

    /// Request priority
    #[serde(default)]
    pub priority: Priority,
}

impl ScrapeRequest {
    /// Create a request with default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: ScrapeOptions::default(),
            priority: Priority::Normal,
        }
    }

    /// Set the options.
    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable image collection.
    pub fn with_images(mut self) -> Self {
        self.options.include_images = true;
        self
    }
}
