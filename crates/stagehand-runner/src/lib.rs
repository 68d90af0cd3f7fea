//! Stagehand: headless runner.
//!
//! Hosts a stage timeline without a renderer: narration is written to the log,
//! scene updates are traced, and an optional autopilot plays the learner.

pub mod autopilot;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
