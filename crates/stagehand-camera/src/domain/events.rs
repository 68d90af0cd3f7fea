//! Signals raised by the choreographer.

use stagehand_core::generation::Generation;

/// Raised by [`crate::application::choreographer::CameraChoreographer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEvent {
    /// The last queued leg reached its target pose.
    Settled {
        /// Generation the move was started under.
        generation: Generation,
    },
}
