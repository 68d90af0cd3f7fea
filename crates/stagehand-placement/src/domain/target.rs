//! Target zones and draggable objects.

use serde::{Deserialize, Serialize};
use stagehand_core::geometry::Vector2;
use stagehand_core::ids::{ObjectId, TargetId};

/// A circular drop zone. Holds at most one occupant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementTarget {
    /// Target id.
    pub id: TargetId,
    /// Zone centre; a hit snaps the object here.
    pub center: Vector2,
    /// Inclusive hit radius around `center`.
    pub tolerance_radius: f32,
    /// The object seated here, if any. Runtime state, never authored.
    #[serde(skip)]
    pub occupant: Option<ObjectId>,
}

impl PlacementTarget {
    /// Creates an empty target.
    #[must_use]
    pub fn new(id: impl Into<TargetId>, center: Vector2, tolerance_radius: f32) -> Self {
        Self {
            id: id.into(),
            center,
            tolerance_radius,
            occupant: None,
        }
    }

    /// Returns true when an object is seated here.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Returns true when `point` lies inside the zone, boundary included.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        self.center.distance(&point) <= self.tolerance_radius
    }
}

/// An object the learner can drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggableObject {
    /// Object id.
    pub id: ObjectId,
    /// Where the object rests and returns to after a miss.
    #[serde(rename = "home")]
    pub home_position: Vector2,
    /// Where the object is now. Runtime state.
    #[serde(skip)]
    pub current_position: Vector2,
    /// True while a scripted motion owns the object. Runtime state.
    #[serde(skip)]
    pub locked: bool,
}

impl DraggableObject {
    /// Creates an unlocked object resting at `home`.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, home: Vector2) -> Self {
        Self {
            id: id.into(),
            home_position: home,
            current_position: home,
            locked: false,
        }
    }

    /// Puts the object back home and unlocks it.
    pub fn reset(&mut self) {
        self.current_position = self.home_position;
        self.locked = false;
    }
}
