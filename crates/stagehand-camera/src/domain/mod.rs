//! Camera domain types.

pub mod events;
pub mod waypoint;
