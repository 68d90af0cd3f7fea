//! Normalized pointer input.

use stagehand_core::geometry::Vector2;
use stagehand_core::ids::ObjectId;

/// A pointer event already mapped by the host onto an object and a point on
/// the placement plane.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// The pointer pressed on an object.
    Down {
        /// The picked object.
        object: ObjectId,
        /// Where it was picked.
        point: Vector2,
    },
    /// The pointer moved while holding an object.
    Move {
        /// The held object.
        object: ObjectId,
        /// The new point.
        point: Vector2,
    },
    /// The pointer released an object.
    Up {
        /// The released object.
        object: ObjectId,
        /// The release point.
        point: Vector2,
    },
    /// The platform cancelled the gesture.
    Cancel {
        /// The held object.
        object: ObjectId,
    },
}

impl PointerInput {
    /// The object the input refers to.
    #[must_use]
    pub fn object(&self) -> &ObjectId {
        match self {
            Self::Down { object, .. }
            | Self::Move { object, .. }
            | Self::Up { object, .. }
            | Self::Cancel { object } => object,
        }
    }
}
