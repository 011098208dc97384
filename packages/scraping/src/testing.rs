//! Testing utilities including a scriptable mock fetch adapter.
//!
//! Useful for testing applications built on this library without making
//! real network calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::fetch::{FetchOptions, FetchedContent, Fetcher};

/// Record of one call made to the mock fetcher.
#[derive(Debug, Clone)]
pub struct MockFetchCall {
    pub url: String,
    pub only_main_content: bool,
}

/// Cloneable handle onto a mock's call history; stays valid after the
/// fetcher moves into an agent.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    inner: Arc<RwLock<Vec<MockFetchCall>>>,
}

impl CallLog {
    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockFetchCall> {
        self.inner.read().expect("call log poisoned").clone()
    }

    /// Number of calls made so far.
    pub fn len(&self) -> usize {
        self.inner.read().expect("call log poisoned").len()
    }

    /// Whether no calls were made.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, call: MockFetchCall) {
        self.inner.write().expect("call log poisoned").push(call);
    }
}

/// Scripted outcome for one fetch attempt. Failures are stored as
/// service-failure reasons so scripts stay cloneable.
type ScriptedOutcome = Result<FetchedContent, String>;

/// A mock fetch adapter with per-URL outcome scripts and call tracking.
///
/// Each URL holds a queue of outcomes consumed one per attempt; the last
/// outcome repeats once the queue drains, so "always fails" and "fails
/// twice then succeeds" are both expressible.
#[derive(Default)]
pub struct MockFetcher {
    scripts: RwLock<HashMap<String, VecDeque<ScriptedOutcome>>>,
    calls: CallLog,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful fetch for a URL.
    pub fn with_page(self, url: impl Into<String>, content: FetchedContent) -> Self {
        self.push(url.into(), Ok(content));
        self
    }

    /// Script a successful fetch returning the given markdown.
    pub fn with_markdown(self, url: impl Into<String>, markdown: impl Into<String>) -> Self {
        self.push(url.into(), Ok(FetchedContent::new(markdown)));
        self
    }

    /// Script a failing fetch for a URL.
    pub fn with_failure(self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.push(url.into(), Err(reason.into()));
        self
    }

    /// Script an ordered sequence of outcomes for a URL.
    pub fn with_sequence(
        self,
        url: impl Into<String>,
        outcomes: impl IntoIterator<Item = ScriptedOutcome>,
    ) -> Self {
        let url = url.into();
        for outcome in outcomes {
            self.push(url.clone(), outcome);
        }
        self
    }

    /// Handle onto the call history.
    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    fn push(&self, url: String, outcome: ScriptedOutcome) {
        self.scripts
            .write()
            .expect("scripts poisoned")
            .entry(url)
            .or_default()
            .push_back(outcome);
    }

    fn next_outcome(&self, url: &str) -> ScriptedOutcome {
        let mut scripts = self.scripts.write().expect("scripts poisoned");
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("non-empty queue"),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(format!("no scripted response for {url}"))),
            None => Err(format!("no scripted response for {url}")),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult<FetchedContent> {
        self.calls.record(MockFetchCall {
            url: url.to_string(),
            only_main_content: options.only_main_content,
        });

        self.next_outcome(url)
            .map_err(|reason| FetchError::Service { reason })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
