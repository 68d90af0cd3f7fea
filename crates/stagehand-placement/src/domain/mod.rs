//! Placement domain types and the pure drop classifier.

pub mod classify;
pub mod errors;
pub mod events;
pub mod motion;
pub mod target;
