//! Stagehand: Recognition Gate.
//!
//! Listens for an expected phrase, compares normalized transcripts against
//! it and re-listens with bounded backoff after a mismatch.

pub mod application;
pub mod domain;
