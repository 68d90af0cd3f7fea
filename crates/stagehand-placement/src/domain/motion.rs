//! Object motion legs.

use std::time::Duration;

use stagehand_core::easing::Easing;
use stagehand_core::geometry::Vector2;

/// One straight-line move of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLeg {
    /// Destination on the placement plane.
    pub to: Vector2,
    /// Travel time in milliseconds.
    pub duration_ms: u64,
    /// Progress remapping.
    pub easing: Easing,
}

impl MotionLeg {
    /// Creates a leg.
    #[must_use]
    pub fn new(to: Vector2, duration_ms: u64, easing: Easing) -> Self {
        Self {
            to,
            duration_ms,
            easing,
        }
    }

    /// The travel time.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
