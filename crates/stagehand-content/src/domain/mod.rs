//! Domain layer for activity scripts.

pub mod errors;
pub mod script;
