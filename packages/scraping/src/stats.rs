//! Cumulative usage counters for one agent instance.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Process-lifetime scrape counters. Mutated exactly once per completed
/// top-level request; reset only by explicit caller action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeStats {
    pub total_requests: u64,
    pub successful_scrapes: u64,
    pub failed_scrapes: u64,
}

/// Lock-guarded tracker shared across concurrent scrapes. The lock keeps
/// the three counters mutually consistent: a snapshot never observes a
/// total without its success/failure half, and reset zeroes all three
/// together.
#[derive(Debug, Default)]
pub struct StatsTracker {
    inner: RwLock<ScrapeStats>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed, successful top-level request.
    pub fn record_success(&self) {
        let mut stats = self.inner.write().expect("stats lock poisoned");
        stats.total_requests += 1;
        stats.successful_scrapes += 1;
    }

    /// Record one completed, failed top-level request.
    pub fn record_failure(&self) {
        let mut stats = self.inner.write().expect("stats lock poisoned");
        stats.total_requests += 1;
        stats.failed_scrapes += 1;
    }

    /// Consistent snapshot of all counters.
    pub fn snapshot(&self) -> ScrapeStats {
        *self.inner.read().expect("stats lock poisoned")
    }

    /// Zero all counters. In-flight requests still record on completion.
    pub fn reset(&self) {
        *self.inner.write().expect("stats lock poisoned") = ScrapeStats::default();
    }
}
