//! Clock abstraction for determinism.
//!
//! Sequencing time (timers, tweens) is driven by the host's frame loop and
//! passed in explicitly as a `Duration`. This clock only supplies wall-clock
//! timestamps for emitted events and recognition attempts.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
