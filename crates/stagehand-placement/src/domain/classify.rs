//! Pure hit/miss classification of a release point.

use serde::Serialize;
use stagehand_core::geometry::Vector2;
use stagehand_core::ids::TargetId;

use crate::domain::target::PlacementTarget;

/// Why a drop did not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissReason {
    /// No free armed target was within tolerance of the release point.
    OutOfTolerance,
    /// The release landed in an armed target that already holds an object.
    TargetOccupied,
    /// The stage expects a different object.
    WrongObject,
    /// A scripted motion owns the object.
    ObjectLocked,
    /// No placement stage is active.
    NotArmed,
}

impl MissReason {
    /// Stable name for logs and event payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OutOfTolerance => "out-of-tolerance",
            Self::TargetOccupied => "target-occupied",
            Self::WrongObject => "wrong-object",
            Self::ObjectLocked => "object-locked",
            Self::NotArmed => "not-armed",
        }
    }
}

/// Result of classifying one release point.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The release lands in a free target.
    Hit {
        /// The chosen target.
        target: TargetId,
        /// Its centre.
        center: Vector2,
        /// Distance from the release point to the centre.
        distance: f32,
    },
    /// The release does not count.
    Miss(MissReason),
}

/// Classifies `release` against `candidates`, given in arm order.
///
/// Occupied targets are never hits. Among free targets the nearest centre
/// wins, earlier candidates winning exact ties, and the drop is a hit iff that
/// distance is within the target's radius (inclusive). A miss that lands inside
/// an occupied target reports `TargetOccupied`.
#[must_use]
pub fn classify<'a, I>(release: Vector2, candidates: I) -> Classification
where
    I: IntoIterator<Item = &'a PlacementTarget>,
{
    if !release.is_finite() {
        return Classification::Miss(MissReason::OutOfTolerance);
    }

    let mut nearest: Option<(&PlacementTarget, f32)> = None;
    let mut inside_occupied = false;
    for target in candidates {
        let distance = target.center.distance(&release);
        if target.is_occupied() {
            inside_occupied |= distance <= target.tolerance_radius;
            continue;
        }
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((target, distance));
        }
    }

    match nearest {
        Some((target, distance)) if distance <= target.tolerance_radius => Classification::Hit {
            target: target.id.clone(),
            center: target.center,
            distance,
        },
        _ if inside_occupied => Classification::Miss(MissReason::TargetOccupied),
        _ => Classification::Miss(MissReason::OutOfTolerance),
    }
}
