use std::time::Duration;

use super::error_classification::FailureKind;

/// Decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Single retry policy shared by rate-limit and generic failures.
///
/// One budget: a 429 followed by a 500 spends two retries, not one from each of two
/// separate counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// `base * 2^attempt`, capped at `max_delay`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_millis().min(u64::MAX as u128) as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let cap = self.max_delay.as_millis().min(u64::MAX as u128) as u64;
        Duration::from_millis(base.saturating_mul(factor).min(cap))
    }

    /// Decide what to do next after an attempt failed.
    ///
    /// - `attempt` is 0-based (first failure => attempt=0).
    /// - every [`FailureKind`] is retryable while budget remains.
    pub fn decide(&self, attempt: u32, _failure: &FailureKind) -> Decision {
        if attempt < self.max_retries {
            Decision::Retry {
                delay: self.backoff_delay(attempt),
            }
        } else {
            Decision::Fail
        }
    }
}
