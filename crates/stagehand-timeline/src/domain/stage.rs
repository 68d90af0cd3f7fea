//! Stages: the units a timeline advances through.

use serde::{Deserialize, Serialize};
use stagehand_core::easing::Easing;
use stagehand_core::geometry::Vector2;
use stagehand_core::ids::{ObjectId, StageId, TargetId, WaypointId};
use stagehand_narration::domain::line::NarrationLine;
use stagehand_recognition::domain::matching::MatchPolicy;

/// One step of an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage id, unique within a sequence.
    pub id: StageId,
    /// What the stage does and when it is complete.
    #[serde(flatten)]
    pub kind: StageKind,
}

impl Stage {
    /// Creates a stage.
    #[must_use]
    pub fn new(id: impl Into<StageId>, kind: StageKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Stage behaviour, tagged by `kind` in authored scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StageKind {
    /// Speak lines; complete when the last one ends.
    Narrate {
        /// Lines, spoken in order.
        lines: Vec<NarrationLine>,
    },
    /// Move the camera (and optionally an object) while narrating; complete
    /// when all three have finished.
    Demo {
        /// Waypoints visited in order.
        #[serde(default)]
        waypoints: Vec<WaypointId>,
        /// Append a leg back to the pose held when the stage began.
        #[serde(default)]
        return_to_start: bool,
        /// Scripted object motion played alongside the camera.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        motion: Option<ScriptedMotion>,
        /// Narration played alongside the camera.
        #[serde(default)]
        lines: Vec<NarrationLine>,
    },
    /// Wait for the learner to seat objects in targets.
    AwaitPlacement {
        /// Targets accepted in this stage, in tie-break order.
        targets: Vec<TargetId>,
        /// The only object accepted, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected_object: Option<ObjectId>,
        /// Hits needed to complete the stage.
        #[serde(default = "default_required_hits")]
        required_hits: usize,
        /// Prompt lines. They do not gate completion.
        #[serde(default)]
        lines: Vec<NarrationLine>,
    },
    /// Wait for the learner to say a phrase.
    AwaitSpeech {
        /// The expected phrase.
        phrase: String,
        /// How forgiving matching is.
        #[serde(default)]
        policy: MatchPolicy,
        /// Prompt lines, spoken before listening starts.
        #[serde(default)]
        lines: Vec<NarrationLine>,
    },
    /// Wait a fixed time.
    Pause {
        /// Wait in milliseconds.
        duration_ms: u64,
    },
}

fn default_required_hits() -> usize {
    1
}

impl StageKind {
    /// Stable name of the kind, as authored.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Narrate { .. } => "narrate",
            Self::Demo { .. } => "demo",
            Self::AwaitPlacement { .. } => "await-placement",
            Self::AwaitSpeech { .. } => "await-speech",
            Self::Pause { .. } => "pause",
        }
    }

    /// Narration lines attached to the stage.
    #[must_use]
    pub fn lines(&self) -> &[NarrationLine] {
        match self {
            Self::Narrate { lines }
            | Self::Demo { lines, .. }
            | Self::AwaitPlacement { lines, .. }
            | Self::AwaitSpeech { lines, .. } => lines,
            Self::Pause { .. } => &[],
        }
    }
}

/// An object moved by the script during a `demo` stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedMotion {
    /// The object to move; it is locked for the whole motion.
    pub object: ObjectId,
    /// Where it goes.
    pub destination: MotionDestination,
    /// Travel time per leg, in milliseconds.
    pub duration_ms: u64,
    /// Progress remapping per leg.
    #[serde(default = "default_motion_easing")]
    pub easing: Easing,
    /// Travel back home afterwards.
    #[serde(default = "default_return_home")]
    pub return_home: bool,
}

fn default_motion_easing() -> Easing {
    Easing::EaseOutCubic
}

fn default_return_home() -> bool {
    true
}

/// Destination of a scripted motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionDestination {
    /// A target's centre. Moving there does not seat the object.
    Target(TargetId),
    /// A point on the placement plane.
    Point(Vector2),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrate_stage_reads_bare_lines() {
        let yaml = "id: intro\nkind: narrate\nlines:\n  - This is one\n  - text: This is two\n    delay_ms: 250\n";

        let stage: Stage = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(stage.id, StageId::new("intro"));
        assert_eq!(stage.kind.name(), "narrate");
        assert_eq!(stage.kind.lines().len(), 2);
        assert_eq!(stage.kind.lines()[1].delay_ms, 250);
    }

    #[test]
    fn test_await_placement_defaults_to_one_hit() {
        let yaml = "id: place\nkind: await-placement\ntargets: [slot-1]\n";

        let stage: Stage = serde_yaml::from_str(yaml).unwrap();

        match stage.kind {
            StageKind::AwaitPlacement {
                required_hits,
                expected_object,
                ..
            } => {
                assert_eq!(required_hits, 1);
                assert_eq!(expected_object, None);
            }
            other => panic!("expected AwaitPlacement, got {other:?}"),
        }
    }

    #[test]
    fn test_demo_motion_defaults_to_ease_out_and_return_home() {
        // Arrange
        let yaml = "\
id: show
kind: demo
waypoints: [overview]
motion:
  object: rod-1
  destination: { target: slot-1 }
  duration_ms: 600
";

        // Act
        let stage: Stage = serde_yaml::from_str(yaml).unwrap();

        // Assert
        let StageKind::Demo { motion: Some(motion), return_to_start, .. } = stage.kind else {
            panic!("expected a demo stage with motion");
        };
        assert!(!return_to_start);
        assert_eq!(motion.easing, Easing::EaseOutCubic);
        assert!(motion.return_home);
        assert_eq!(
            motion.destination,
            MotionDestination::Target(TargetId::new("slot-1"))
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let yaml = "id: x\nkind: dance\n";

        let result: Result<Stage, _> = serde_yaml::from_str(yaml);

        assert!(result.is_err());
    }
}
