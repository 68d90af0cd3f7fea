//! Narration domain types.

pub mod events;
pub mod line;
pub mod preferences;
pub mod voice;
