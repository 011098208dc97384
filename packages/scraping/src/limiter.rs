//! Per-domain request pacing.
//!
//! A keyed token-bucket limiter: each source domain gets its own bucket,
//! so a scrape waiting on domain D never blocks scrapes of other domains.

use governor::clock::DefaultClock;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

type KeyedLimiter = RateLimiter<String, DashMapStateStore<String>, DefaultClock>;

/// Domain-keyed rate limiter, togglable at construction.
pub struct DomainRateLimiter {
    limiter: Option<Arc<KeyedLimiter>>,
}

impl Default for DomainRateLimiter {
    fn default() -> Self {
        Self::new(2, 4)
    }
}

impl DomainRateLimiter {
    /// Limiter allowing `requests_per_second` sustained per domain, with
    /// bursts up to `burst`. Zeroes are clamped to the minimum quota.
    pub fn new(requests_per_second: u32, burst: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
        let burst = NonZeroU32::new(burst).unwrap_or(nonzero!(1u32));
        let quota = Quota::per_second(rate).allow_burst(burst);

        Self {
            limiter: Some(Arc::new(RateLimiter::keyed(quota))),
        }
    }

    /// Limiter that never waits.
    pub fn disabled() -> Self {
        Self { limiter: None }
    }

    /// Whether pacing is active.
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Suspend until the domain's bucket has capacity. Immediate when
    /// disabled.
    pub async fn acquire(&self, domain: &str) {
        if let Some(limiter) = &self.limiter {
            limiter.until_key_ready(&domain.to_string()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_same_domain_is_paced() {
        let limiter = DomainRateLimiter::new(2, 1);
        let start = Instant::now();

        // Burst of 1: second and third acquire must wait ~500ms each
        limiter.acquire("gumroad.com").await;
        limiter.acquire("gumroad.com").await;
        limiter.acquire("gumroad.com").await;

        assert!(
            start.elapsed().as_millis() >= 800,
            "pacing not applied: {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_domains_do_not_serialize() {
        let limiter = DomainRateLimiter::new(1, 1);
        let start = Instant::now();

        limiter.acquire("gumroad.com").await;
        limiter.acquire("udemy.com").await;
        limiter.acquire("etsy.com").await;

        assert!(
            start.elapsed().as_millis() < 300,
            "independent domains blocked each other: {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_disabled_never_waits() {
        let limiter = DomainRateLimiter::disabled();
        assert!(!limiter.is_enabled());

        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire("gumroad.com").await;
        }
        assert!(start.elapsed().as_millis() < 100);
    }
}
