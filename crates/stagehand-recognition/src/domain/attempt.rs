//! One recognized utterance and its verdict.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A transcript the gate evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionAttempt {
    /// Raw transcript as the engine reported it.
    pub transcript: String,
    /// Whether it matched the expected phrase.
    pub matched: bool,
    /// When it was evaluated.
    pub timestamp: DateTime<Utc>,
}
