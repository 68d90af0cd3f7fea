//! Easing curves used to remap tween progress.

use serde::{Deserialize, Serialize};

/// A progress remapping function over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic acceleration from rest.
    EaseInQuad,
    /// Quadratic deceleration to rest.
    EaseOutQuad,
    /// Quadratic acceleration then deceleration.
    EaseInOutQuad,
    /// Cubic acceleration from rest.
    EaseInCubic,
    /// Cubic deceleration to rest. Default for scripted object motion.
    EaseOutCubic,
    /// Cubic acceleration then deceleration.
    EaseInOutCubic,
    /// Hermite smoothstep (`3t² − 2t³`).
    Smoothstep,
}

impl Easing {
    /// Remaps `t` through this curve. Input and output are clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = clamp_unit(t);
        let eased = match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        };
        clamp_unit(eased)
    }
}

/// Clamps to `[0, 1]`, mapping NaN to 0.
#[must_use]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
