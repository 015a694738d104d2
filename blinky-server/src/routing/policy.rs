//! Retry policy and provider rotation

use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// How many provider calls a resolution may make and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Delay after the failed attempt `attempt` (0-based): `base × (attempt + 1)`
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.saturating_add(1))
    }
}

/// Picks which candidate provider serves the next attempt
pub trait ProviderSelector: Send + Sync {
    /// Index into a non-empty candidate list of length `candidates`
    fn select(&self, candidates: usize) -> usize;
}

/// Uniform random choice
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl ProviderSelector for RandomSelector {
    fn select(&self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..candidates)
    }
}
