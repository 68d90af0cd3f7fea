//! Recognition domain types and the pure matcher.

pub mod attempt;
pub mod events;
pub mod matching;
pub mod retry;
