//! The uniform result payload returned by every public operation.
//!
//! Every scrape resolves to a tagged success-or-failure value rather than
//! raising, so batch and concurrent callers never need per-item exception
//! handling.

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::types::product::ProductExtract;

/// Error code family surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Any pipeline failure: invalid URL, unsupported domain, fetch
    /// failure, retries exhausted. Distinguished by message.
    ScrapingFailed,
    /// Non-URL input handed to the generic entry point
    InvalidInput,
}

/// Failure payload attached to an unsuccessful [`ScrapeResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ScrapeError> for ScrapeFailure {
    fn from(err: &ScrapeError) -> Self {
        let code = match err {
            ScrapeError::InvalidInput { .. } => ErrorCode::InvalidInput,
            _ => ErrorCode::ScrapingFailed,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

/// Tagged outcome of a single scrape.
///
/// Invariant: `data` is present iff `success` is true; `error` is present
/// iff `success` is false. Construct through [`ScrapeResult::ok`] and
/// [`ScrapeResult::failure`] to preserve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ProductExtract>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ScrapeFailure>,
}

impl ScrapeResult {
    /// A successful scrape carrying its extracted record.
    pub fn ok(data: ProductExtract) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed scrape carrying its error payload.
    pub fn failure(err: &ScrapeError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ScrapeFailure::from(err)),
        }
    }

    /// Whether the scrape succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}
