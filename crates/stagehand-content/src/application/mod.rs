//! Application layer for activity scripts.

pub mod compiler;
pub mod loader;
