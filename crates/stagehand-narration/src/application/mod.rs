//! Narration queue driver.

pub mod queue;
