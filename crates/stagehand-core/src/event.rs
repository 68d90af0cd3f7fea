//! Observable signal abstractions.
//!
//! Collaborators buffer the signals they raise; the host drains the buffer
//! after each call and reacts (routing, persistence, feedback). Signals are
//! plain data so they can be logged or stored as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::Generation;

/// Metadata attached to every emitted signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for routing (e.g. `timeline.stage_completed`).
    pub event_type: String,
    /// The run (one `start()`) this event belongs to.
    pub run_id: Uuid,
    /// Generation the run was started under.
    pub generation: Generation,
    /// Monotonically increasing position within the run.
    pub sequence_number: u64,
    /// Wall-clock timestamp of emission.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all emitted signals implement.
pub trait SequencerEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
