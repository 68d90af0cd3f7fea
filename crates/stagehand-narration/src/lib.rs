//! Stagehand: Narration Queue.
//!
//! Serializes spoken lines one at a time over an injected text-to-speech
//! engine, with per-line delays, global volume preferences, preferred-voice
//! selection and cancellation.

pub mod application;
pub mod domain;
