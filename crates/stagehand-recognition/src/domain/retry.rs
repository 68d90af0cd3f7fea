//! Backoff between listening attempts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exponential backoff, doubling per consecutive miss up to a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay after the first miss, in milliseconds.
    pub base_ms: u64,
    /// Upper bound on any delay, in milliseconds.
    pub max_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_ms: 350,
            max_ms: 1_400,
        }
    }
}

impl RetryPolicy {
    /// Delay before re-listening after the `attempt`-th consecutive miss
    /// (1-based). Attempt 0 is treated as 1.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32);
        let scaled = self.base_ms.saturating_mul(1_u64 << exponent);
        Duration::from_millis(scaled.min(self.max_ms.max(self.base_ms)))
    }

    /// The base delay.
    #[must_use]
    pub fn base(&self) -> Duration {
        Duration::from_millis(self.base_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_then_caps() {
        let policy = RetryPolicy::default();

        let delays: Vec<u128> = (1..=5).map(|n| policy.delay(n).as_millis()).collect();

        assert_eq!(delays, vec![350, 700, 1_400, 1_400, 1_400]);
    }

    #[test]
    fn test_huge_attempt_counts_do_not_overflow() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay(u32::MAX), Duration::from_millis(1_400));
    }
}
