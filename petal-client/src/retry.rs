//! Bounded retry with exponential backoff and jitter.

use std::time::Duration;

use rand::Rng;

/// Retry policy for transient HTTP failures.
///
/// Delays double from `base_delay` up to `max_delay`, with up to
/// `jitter_fraction` of the delay added as uniform random jitter so that
/// concurrent CI jobs hitting the same project do not retry in lockstep.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Fraction (0.0 - 1.0) of the delay added as random jitter.
    pub jitter_fraction: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(30),
            jitter_fraction: 0.25,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following failed attempt `attempt`
    /// (zero-based), jitter included.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        let capped = exp.min(self.max_delay);
        if self.jitter_fraction <= 0.0 {
            return capped;
        }
        let jitter_ms = capped.as_millis() as f64 * self.jitter_fraction;
        let extra = rand::thread_rng().gen_range(0.0..=jitter_ms);
        capped + Duration::from_millis(extra as u64)
    }
}
