use std::time::Duration;

use crate::config::RetryConfig;

/// Capped exponential backoff between refresh attempts.
///
/// `delay_for(n) = min(base * multiplier^n, max)`, so the sequence is
/// non-decreasing for any `multiplier >= 1` and never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    pub base: Duration,
    pub max: Duration,
    pub multiplier: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for BackoffPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            base: config.base_delay(),
            max: config.max_delay(),
            multiplier: config.backoff_multiplier.max(1.0),
        }
    }
}

impl BackoffPolicy {
    /// Returns the delay to wait after the `attempt`-th failure (zero-based).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let scaled = self.base.as_secs_f64() * self.multiplier.powi(exponent);
        if !scaled.is_finite() || scaled >= self.max.as_secs_f64() {
            return self.max;
        }
        Duration::from_secs_f64(scaled).min(self.max)
    }
}
