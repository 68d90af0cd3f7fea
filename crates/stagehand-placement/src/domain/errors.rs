//! Rejected placement operations.

use stagehand_core::ids::{ObjectId, TargetId};
use thiserror::Error;

/// A pointer or script operation the validator refused.
///
/// These are host-input mistakes (a stale pointer, a script naming the wrong
/// object), not learner misses; learner misses are [`crate::domain::classify::MissReason`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// No object with this id exists.
    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),

    /// No target with this id exists.
    #[error("unknown target: {0}")]
    UnknownTarget(TargetId),

    /// A scripted motion owns the object.
    #[error("object {0} is locked by a scripted motion")]
    ObjectLocked(ObjectId),

    /// The object is already seated in a target.
    #[error("object {0} is seated in a target")]
    ObjectSeated(ObjectId),

    /// The object is not being dragged.
    #[error("object {0} is not being dragged")]
    NotDragging(ObjectId),
}
