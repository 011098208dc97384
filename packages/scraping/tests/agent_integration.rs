//! End-to-end pipeline tests against the scriptable mock fetcher.

use std::time::Duration;

use scraping::testing::MockFetcher;
use scraping::{
    ErrorCode, FetchedContent, PricingKind, RetryPolicy, ScrapeOptions, ScrapeRequest,
    ScraperConfig, ScrapingAgent,
};

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(10),
        multiplier: 2.0,
        jitter_factor: 0.0,
    }
}

fn agent_with(fetcher: MockFetcher, max_retries: u32) -> ScrapingAgent<MockFetcher> {
    ScrapingAgent::with_fetcher(
        ScraperConfig::new("test-key")
            .without_rate_limit()
            .with_max_retries(max_retries),
        fetcher,
    )
    .with_retry_policy(fast_retry(max_retries))
}

#[tokio::test]
async fn scrape_succeeds_after_transient_failures() {
    let url = "https://gumroad.com/l/design-kit";
    let fetcher = MockFetcher::new().with_sequence(
        url,
        [
            Err("upstream 503".to_string()),
            Err("upstream 503".to_string()),
            Ok(FetchedContent::new("# Design Kit\n\nGreat kit.\n\n$29.99")),
        ],
    );
    let calls = fetcher.call_log();
    let agent = agent_with(fetcher, 2);

    let result = agent.scrape_product(&ScrapeRequest::new(url)).await;

    assert!(result.success);
    assert_eq!(calls.len(), 3, "expected exactly three fetch attempts");

    let product = result.data.unwrap();
    assert_eq!(product.title.as_deref(), Some("Design Kit"));
    assert_eq!(product.pricing.unwrap().amount, Some(29.99));
}

#[tokio::test]
async fn scrape_fails_after_exhausting_retries() {
    let url = "https://udemy.com/course/rust";
    let fetcher = MockFetcher::new().with_failure(url, "connection reset");
    let calls = fetcher.call_log();
    let agent = agent_with(fetcher, 2);

    let result = agent.scrape_product(&ScrapeRequest::new(url)).await;

    assert!(!result.success);
    assert_eq!(calls.len(), 3, "max_retries=2 means exactly three attempts");

    let failure = result.error.unwrap();
    assert_eq!(failure.code, ErrorCode::ScrapingFailed);
    assert!(failure.message.contains("connection reset"));
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_times_out_and_retries() {
    let url = "https://etsy.com/listing/42";
    // Nothing scripted: the mock still answers, so make it hang instead
    struct HangingFetcher;

    #[async_trait::async_trait]
    impl scraping::Fetcher for HangingFetcher {
        async fn fetch(
            &self,
            _url: &str,
            _options: &scraping::FetchOptions,
        ) -> scraping::FetchResult<FetchedContent> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(FetchedContent::new("never returned"))
        }
    }

    let agent = ScrapingAgent::with_fetcher(
        ScraperConfig::new("test-key")
            .without_rate_limit()
            .with_max_retries(1)
            .with_timeout(Duration::from_millis(20)),
        HangingFetcher,
    )
    .with_retry_policy(fast_retry(1));

    let result = agent.scrape_product(&ScrapeRequest::new(url)).await;

    assert!(!result.success);
    assert!(result.error_message().unwrap().contains("timeout"));
}

#[tokio::test]
async fn batch_preserves_order_and_isolates_failures() {
    let ok_url = "https://gumroad.com/l/kit";
    let bad_url = "https://coursera.org/learn/rust";

    let fetcher = MockFetcher::new()
        .with_markdown(ok_url, "# Kit\n\nA kit.")
        .with_failure(bad_url, "gateway timeout");
    let agent = agent_with(fetcher, 0);

    let requests = vec![
        ScrapeRequest::new(ok_url),
        ScrapeRequest::new(bad_url),
        ScrapeRequest::new("not-a-valid-url"),
    ];
    let results = agent.scrape_multiple_products(&requests).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1].error_message().unwrap().contains("gateway timeout"));
    assert!(!results[2].success);
    assert!(results[2].error_message().unwrap().contains("invalid URL"));
}

#[tokio::test]
async fn batch_respects_concurrency_bound() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct GaugeFetcher {
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl scraping::Fetcher for GaugeFetcher {
        async fn fetch(
            &self,
            _url: &str,
            _options: &scraping::FetchOptions,
        ) -> scraping::FetchResult<FetchedContent> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(FetchedContent::new("# Page"))
        }
    }

    let fetcher = GaugeFetcher::default();
    let peak = fetcher.peak.clone();

    let agent = ScrapingAgent::with_fetcher(
        ScraperConfig::new("test-key")
            .without_rate_limit()
            .with_max_concurrency(2),
        fetcher,
    );

    let requests: Vec<ScrapeRequest> = (0..8)
        .map(|i| ScrapeRequest::new(format!("https://gumroad.com/l/item-{i}")))
        .collect();
    let results = agent.scrape_multiple_products(&requests).await;

    assert!(results.iter().all(|r| r.success));
    assert!(
        peak.load(Ordering::SeqCst) <= 2,
        "worker pool exceeded its bound: {}",
        peak.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn stats_count_once_per_request_and_reset() {
    let ok_url = "https://gumroad.com/l/kit";
    let bad_url = "https://udemy.com/course/x";

    let fetcher = MockFetcher::new()
        .with_markdown(ok_url, "# Kit")
        .with_failure(bad_url, "boom");
    let agent = agent_with(fetcher, 0);

    agent.scrape_product(&ScrapeRequest::new(ok_url)).await;
    assert_eq!(agent.stats().total_requests, 1);

    let batch = vec![
        ScrapeRequest::new(ok_url),
        ScrapeRequest::new(bad_url),
        ScrapeRequest::new("https://nowhere.example/x"),
    ];
    agent.scrape_multiple_products(&batch).await;

    let stats = agent.stats();
    assert_eq!(stats.total_requests, 4);
    assert_eq!(stats.successful_scrapes, 2);
    assert_eq!(stats.failed_scrapes, 2);

    agent.reset_stats();
    let zeroed = agent.stats();
    assert_eq!(zeroed.total_requests, 0);
    assert_eq!(zeroed.successful_scrapes, 0);
    assert_eq!(zeroed.failed_scrapes, 0);
}

#[tokio::test]
async fn extraction_anomalies_are_not_errors() {
    let url = "https://skillshare.com/classes/drawing";
    let fetcher = MockFetcher::new().with_markdown(url, "nothing useful on this page");
    let agent = agent_with(fetcher, 0);

    let result = agent.scrape_product(&ScrapeRequest::new(url)).await;

    assert!(result.success, "sparse content must not fail the scrape");
    let product = result.data.unwrap();
    assert!(product.title.is_none());
    assert!(product.pricing.is_none());
    assert!(product.features.is_empty());
    assert_eq!(product.source, "Skillshare");
}

#[tokio::test]
async fn subscription_listing_end_to_end() {
    let url = "https://podia.com/courses/watercolor";
    let markdown = "\
# Watercolor Masterclass

Learn watercolor from scratch.

€49.99/month

- 12 modules
- Weekly feedback
- Community access
";
    let fetcher = MockFetcher::new().with_markdown(url, markdown);
    let agent = agent_with(fetcher, 0);

    let result = agent
        .scrape_product(&ScrapeRequest::new(url).with_options(ScrapeOptions {
            include_images: true,
            ..ScrapeOptions::default()
        }))
        .await;

    let product = result.data.unwrap();
    let pricing = product.pricing.unwrap();
    assert_eq!(pricing.amount, Some(49.99));
    assert_eq!(pricing.currency.as_deref(), Some("EUR"));
    assert_eq!(pricing.kind, PricingKind::Subscription);
    assert_eq!(
        product.features,
        vec!["12 modules", "Weekly feedback", "Community access"]
    );
    assert_eq!(product.images, Some(vec![]));
}

#[tokio::test]
async fn result_wire_format_holds_invariant() {
    let url = "https://gumroad.com/l/kit";
    let fetcher = MockFetcher::new().with_markdown(url, "# Kit");
    let agent = agent_with(fetcher, 0);

    let ok = agent.scrape_product(&ScrapeRequest::new(url)).await;
    let ok_json = serde_json::to_value(&ok).unwrap();
    assert_eq!(ok_json["success"], true);
    assert!(ok_json.get("data").is_some());
    assert!(ok_json.get("error").is_none());

    let failed = agent
        .scrape_product(&ScrapeRequest::new("not-a-valid-url"))
        .await;
    let failed_json = serde_json::to_value(&failed).unwrap();
    assert_eq!(failed_json["success"], false);
    assert!(failed_json.get("data").is_none());
    assert_eq!(failed_json["error"]["code"], "SCRAPING_FAILED");
}
