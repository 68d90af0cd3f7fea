//! Signals emitted by the timeline.

use serde::Serialize;
use stagehand_core::event::{EventMetadata, SequencerEvent};
use stagehand_core::ids::{ActivityId, ObjectId, StageId, TargetId};
use stagehand_placement::domain::classify::MissReason;

/// Emitted when a stage becomes the active stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageActivated {
    /// The stage.
    pub stage_id: StageId,
    /// Its position in the sequence.
    pub index: usize,
    /// Its kind, as authored.
    pub kind: String,
}

/// Emitted when a stage's completion conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCompleted {
    /// The stage.
    pub stage_id: StageId,
    /// Its position in the sequence.
    pub index: usize,
}

/// Emitted once per run, after the last stage completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceCompleted {
    /// The finished activity.
    pub activity_id: ActivityId,
    /// The sequence that ran.
    pub sequence: String,
    /// Fingerprint of the definition that ran.
    pub definition_hash: String,
}

/// Why a run was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetReason {
    /// `reset()` was called.
    Reset,
    /// `stop()` was called.
    Stop,
}

/// Emitted by `reset()` and `stop()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceReset {
    /// What interrupted the run.
    pub reason: ResetReason,
    /// The stage that was active, if any.
    pub interrupted_stage: Option<StageId>,
}

/// Emitted when a drop seats an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementHit {
    /// The active stage.
    pub stage_id: Option<StageId>,
    /// The seated object.
    pub object_id: ObjectId,
    /// The target holding it.
    pub target_id: TargetId,
    /// Hits so far in this stage.
    pub hits: usize,
    /// Hits the stage needs.
    pub required_hits: usize,
}

/// Emitted when a drop does not count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementMissed {
    /// The active stage, if any.
    pub stage_id: Option<StageId>,
    /// The dropped object.
    pub object_id: ObjectId,
    /// Why it missed.
    pub reason: MissReason,
}

/// Emitted when a spoken answer did not match and listening will resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryPrompted {
    /// The active stage.
    pub stage_id: StageId,
    /// Consecutive misses so far.
    pub attempt: u32,
    /// What was heard.
    pub transcript: String,
    /// Delay before listening resumes, in milliseconds.
    pub retry_in_ms: u64,
}

/// An input or output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modality {
    /// Spoken narration.
    Speech,
    /// Speech recognition.
    Recognition,
}

/// Emitted when a stage completes without a modality it wanted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalityDegraded {
    /// The affected stage.
    pub stage_id: StageId,
    /// The missing modality.
    pub modality: Modality,
    /// Short cause.
    pub reason: String,
}

/// Event payload variants for the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimelineEventKind {
    /// A stage became active.
    StageActivated(StageActivated),
    /// A stage completed.
    StageCompleted(StageCompleted),
    /// The sequence completed.
    SequenceCompleted(SequenceCompleted),
    /// The run was reset or stopped.
    SequenceReset(SequenceReset),
    /// A drop was a hit.
    PlacementHit(PlacementHit),
    /// A drop was a miss.
    PlacementMissed(PlacementMissed),
    /// A spoken answer missed.
    RetryPrompted(RetryPrompted),
    /// A modality was unavailable.
    ModalityDegraded(ModalityDegraded),
}

impl TimelineEventKind {
    /// Routing name for this kind.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::StageActivated(_) => "timeline.stage_activated",
            Self::StageCompleted(_) => "timeline.stage_completed",
            Self::SequenceCompleted(_) => "timeline.sequence_completed",
            Self::SequenceReset(_) => "timeline.sequence_reset",
            Self::PlacementHit(_) => "timeline.placement_hit",
            Self::PlacementMissed(_) => "timeline.placement_missed",
            Self::RetryPrompted(_) => "timeline.retry_prompted",
            Self::ModalityDegraded(_) => "timeline.modality_degraded",
        }
    }
}

/// Event envelope for the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: TimelineEventKind,
}

impl SequencerEvent for TimelineEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
