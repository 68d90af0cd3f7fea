//! Outcomes and signals raised by the validator.

use stagehand_core::generation::Generation;
use stagehand_core::geometry::Vector2;
use stagehand_core::ids::{ObjectId, TargetId};

use crate::domain::classify::MissReason;

/// Result of releasing a dragged object.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The object was seated in `target`.
    Hit {
        /// The seated object.
        object: ObjectId,
        /// The target now holding it.
        target: TargetId,
        /// The target centre the object snapped to.
        position: Vector2,
    },
    /// The drop did not count; the object is returning home.
    Miss {
        /// The dropped object.
        object: ObjectId,
        /// Why it did not count.
        reason: MissReason,
        /// Where it was released.
        release: Vector2,
    },
}

impl DropOutcome {
    /// Returns true for a hit.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Buffered signal, drained with `take_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    /// An object's position changed; the scene should follow.
    ObjectMoved {
        /// The moved object.
        object: ObjectId,
        /// Its new position.
        position: Vector2,
    },
    /// A scripted motion finished and the object is unlocked.
    MotionSettled {
        /// The object that was moving.
        object: ObjectId,
        /// Generation the motion was started under.
        generation: Generation,
    },
}
