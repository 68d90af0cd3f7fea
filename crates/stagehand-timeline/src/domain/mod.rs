//! Activity definitions, stages and timeline signals.

pub mod activity;
pub mod config;
pub mod events;
pub mod input;
pub mod stage;
