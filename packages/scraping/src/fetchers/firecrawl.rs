//! Firecrawl-backed fetch adapter.
//!
//! Talks to the Firecrawl scrape API, which handles JavaScript rendering,
//! anti-bot protection, and markdown conversion. This is the production
//! adapter; the pipeline itself never parses HTML.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ApiKey;
use crate::error::{FetchError, FetchResult};
use crate::fetch::{ContentMetadata, FetchOptions, FetchedContent, Fetcher};

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Fetch adapter backed by the Firecrawl API.
pub struct FirecrawlFetcher {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

// Wire types for the scrape endpoint

#[derive(Serialize)]
struct ScrapeApiRequest<'a> {
    url: &'a str,
    formats: &'a [String],
    #[serde(rename = "onlyMainContent")]
    only_main_content: bool,
    /// Milliseconds
    timeout: u64,
}

#[derive(Deserialize)]
struct ScrapeApiResponse {
    success: bool,
    data: Option<ScrapeApiData>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeApiData {
    markdown: Option<String>,
    html: Option<String>,
    metadata: Option<ApiMetadata>,
}

#[derive(Deserialize)]
struct ApiMetadata {
    title: Option<String>,
    description: Option<String>,
    language: Option<String>,
}

impl FirecrawlFetcher {
    /// Create a fetcher with the given API key.
    pub fn new(api_key: ApiKey) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Create from the `FIRECRAWL_API_KEY` environment variable.
    pub fn from_env() -> FetchResult<Self> {
        let api_key = std::env::var("FIRECRAWL_API_KEY").map_err(|_| FetchError::Service {
            reason: "FIRECRAWL_API_KEY environment variable not set".to_string(),
        })?;
        Self::new(ApiKey::new(api_key))
    }

    /// Override the API base URL (tests, self-hosted deployments).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_scrape(&self, request: &ScrapeApiRequest<'_>) -> FetchResult<ScrapeApiResponse> {
        let url = format!("{}/scrape", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Service {
                reason: format!("Firecrawl API error: {status} - {body}"),
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))
    }
}

#[async_trait]
impl Fetcher for FirecrawlFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult<FetchedContent> {
        let request = ScrapeApiRequest {
            url,
            formats: &options.formats,
            only_main_content: options.only_main_content,
            timeout: options.timeout.as_millis() as u64,
        };

        let response = self.post_scrape(&request).await?;

        if !response.success {
            return Err(FetchError::Service {
                reason: response
                    .error
                    .unwrap_or_else(|| "scrape failed".to_string()),
            });
        }

        let data = response.data.ok_or_else(|| FetchError::NoContent {
            url: url.to_string(),
        })?;

        let markdown = data
            .markdown
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| FetchError::NoContent {
                url: url.to_string(),
            })?;

        let metadata = data
            .metadata
            .map(|m| ContentMetadata {
                title: m.title,
                description: m.description,
                language: m.language,
            })
            .unwrap_or_default();

        Ok(FetchedContent {
            markdown,
            html: data.html,
            metadata,
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}
