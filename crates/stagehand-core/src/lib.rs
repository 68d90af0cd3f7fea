//! Stagehand Core: shared abstractions for the presentation sequencer.
//!
//! This crate defines the vocabulary every collaborator depends on: ids,
//! geometry, easing, the generation token, the generation-aware scheduler,
//! and the capability traits that stand in for the host's speech, recognition
//! and render engines. It contains no engine code.

pub mod capability;
pub mod clock;
pub mod easing;
pub mod error;
pub mod event;
pub mod generation;
pub mod geometry;
pub mod ids;
pub mod schedule;
pub mod tween;
