//! Stagehand: Placement Validator.
//!
//! Owns the draggable objects and target zones of one activity, classifies
//! drag releases as hits or misses, and animates objects home or along
//! scripted paths.

pub mod application;
pub mod domain;
