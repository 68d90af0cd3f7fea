//! Stagehand: Content.
//!
//! Reads authored activity scripts, selects one of their sequences, and
//! compiles it into a validated, fingerprinted `ActivityDefinition`.

pub mod application;
pub mod domain;
