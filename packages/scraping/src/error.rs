//! Typed errors for the scraping library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Pipeline failures never
//! escape the public facade as `Err`; they are folded into the uniform
//! [`crate::types::ScrapeResult`] payload.

use thiserror::Error;

/// Errors produced by a fetch adapter (one attempt, no retries).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection, TLS, malformed response)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The fetch service answered but reported a failure
    #[error("fetch service failure: {reason}")]
    Service { reason: String },

    /// The attempt exceeded its time budget
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// The service answered success but returned no usable content
    #[error("no content returned for: {url}")]
    NoContent { url: String },
}

/// Errors that terminate a single scrape request.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Non-URL input handed to the generic entry point; rejected before
    /// any classification or network activity
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The request URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Syntactically valid URL whose domain is not in the source registry
    #[error("unsupported source domain: {host}")]
    UnsupportedSource { host: String },

    /// Every fetch attempt failed; carries the last failure reason
    #[error("scraping failed after {attempts} attempts: {reason}")]
    RetriesExhausted { attempts: u32, reason: String },
}

impl ScrapeError {
    /// Whether this failure happened before any fetch was attempted.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ScrapeError::RetriesExhausted { .. })
    }
}

/// Result type alias for fetch adapter operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
