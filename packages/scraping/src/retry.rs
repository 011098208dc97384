//! Retry policy with exponential backoff and jitter.
//!
//! The policy is a pure value type: backoff computation and the
//! should-retry predicate live here, the async driving loop lives in the
//! agent. That keeps the arithmetic testable without a runtime.

use std::time::Duration;

/// Backoff schedule for repeated fetch attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure
    pub max_retries: u32,

    /// Delay before the first retry
    pub initial_backoff: Duration,

    /// Ceiling on any single delay
    pub max_backoff: Duration,

    /// Exponential growth factor
    pub multiplier: f64,

    /// Proportional jitter (0.0 disables)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given retry budget and default timing.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Disable jitter, for deterministic scheduling.
    pub fn without_jitter(mut self) -> Self {
        self.jitter_factor = 0.0;
        self
    }

    /// Total attempts a request may consume.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Whether another attempt is allowed after `failures` failures.
    pub fn should_retry(&self, failures: u32) -> bool {
        failures <= self.max_retries
    }

    /// Delay before the retry following failure number `attempt` (1-based):
    /// `initial * multiplier^(attempt-1)`, capped, with jitter.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31) as i32;
        let raw = self.initial_backoff.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = raw.min(self.max_backoff.as_secs_f64());

        let jitter_range = capped * self.jitter_factor;
        let with_jitter = if jitter_range > 0.0 {
            capped + rand::random_range(-jitter_range..jitter_range)
        } else {
            capped
        };

        Duration::from_secs_f64(with_jitter.max(0.0))
    }
}
