//! Stagehand: Camera Choreographer.
//!
//! Moves a viewpoint through an ordered list of waypoints. Progress is a pure
//! function of elapsed time, so the frame rate never changes the path or the
//! total duration.

pub mod application;
pub mod domain;
