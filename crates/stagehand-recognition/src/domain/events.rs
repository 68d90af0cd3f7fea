//! Signals raised by the gate.

use std::time::Duration;

use stagehand_core::capability::ListenTicket;

use crate::domain::matching::MatchKind;

/// What happened at the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateEvent {
    /// A listening session was opened.
    Listening {
        /// Ticket the recognizer will report back with.
        ticket: ListenTicket,
    },
    /// The expected phrase was heard. Raised once per arming.
    Matched {
        /// The accepted transcript.
        transcript: String,
        /// Which rule accepted it.
        kind: MatchKind,
    },
    /// A transcript did not match; listening resumes at `retry_at`.
    RetryPrompt {
        /// Consecutive misses so far, starting at 1.
        attempt: u32,
        /// The transcript that missed.
        transcript: String,
        /// Frame-loop instant when listening resumes.
        retry_at: Duration,
    },
    /// Recognition is missing, denied or broken for this arming.
    Unavailable {
        /// Short machine-readable cause.
        reason: String,
    },
}
