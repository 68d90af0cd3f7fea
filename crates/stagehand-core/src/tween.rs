//! Time-based interpolation sampled from the frame loop.

use std::time::Duration;

use crate::easing::{Easing, clamp_unit};
use crate::geometry::Lerp;

/// One interpolation from `from` to `to` starting at `start`.
///
/// Progress is computed from elapsed frame-loop time on every sample, never
/// accumulated per tick, so irregular frame intervals do not change the total
/// duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp + Clone> Tween<T> {
    /// Creates a tween.
    #[must_use]
    pub fn new(from: T, to: T, start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Raw linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        clamp_unit(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    /// Interpolated value at `now`, with progress remapped through the easing.
    #[must_use]
    pub fn sample(&self, now: Duration) -> T {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.easing.apply(progress))
    }

    /// Returns true once progress has reached 1.0.
    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }

    /// The instant progress reaches 1.0.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// The target value.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }
}
