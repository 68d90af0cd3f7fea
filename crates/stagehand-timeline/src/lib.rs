//! Stagehand: Stage Timeline Controller.
//!
//! Owns an activity's ordered stages, dispatches each to the narration,
//! camera, placement and recognition collaborators, advances when a stage's
//! completion conditions hold, and discards every callback that belongs to a
//! previous run through the generation token.

pub mod application;
pub mod domain;
