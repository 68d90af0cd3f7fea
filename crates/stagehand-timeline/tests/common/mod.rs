//! Shared helpers for timeline integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use stagehand_camera::domain::waypoint::Waypoint;
use stagehand_core::capability::Capabilities;
use stagehand_core::easing::Easing;
use stagehand_core::geometry::{CameraPose, Vector2, Vector3};
use stagehand_core::ids::{ActivityId, ObjectId, TargetId, WaypointId};
use stagehand_narration::domain::line::NarrationLine;
use stagehand_placement::domain::target::{DraggableObject, PlacementTarget};
use stagehand_recognition::domain::matching::MatchPolicy;
use stagehand_test_support::{
    FakeRecognizer, FakeSynthesizer, FixedClock, RecordingScene, fixed_clock,
};
use stagehand_timeline::application::controller::StageTimeline;
use stagehand_timeline::domain::activity::{ActivityDefinition, DEFAULT_SEQUENCE};
use stagehand_timeline::domain::config::TimelineConfig;
use stagehand_timeline::domain::events::TimelineEvent;
use stagehand_timeline::domain::input::PointerInput;
use stagehand_timeline::domain::stage::{Stage, StageKind};

pub const SLOT_1: Vector2 = Vector2::new(0.0, 0.0);
pub const SLOT_2: Vector2 = Vector2::new(2.0, 0.0);
pub const ROD_HOME: Vector2 = Vector2::new(5.0, 5.0);

/// Fake engines and scene handed to the timeline on every call.
pub struct Rig {
    pub synth: FakeSynthesizer,
    pub recognizer: FakeRecognizer,
    pub scene: RecordingScene,
    pub clock: FixedClock,
}

impl Rig {
    pub fn new() -> Self {
        Self::with(FakeSynthesizer::new(), FakeRecognizer::new())
    }

    pub fn with(synth: FakeSynthesizer, recognizer: FakeRecognizer) -> Self {
        Self {
            synth,
            recognizer,
            scene: RecordingScene::new(),
            clock: fixed_clock(),
        }
    }

    pub fn caps(&mut self) -> Capabilities<'_> {
        Capabilities {
            synthesizer: &mut self.synth,
            recognizer: &mut self.recognizer,
            scene: &mut self.scene,
            clock: &self.clock,
        }
    }

    /// Ends the utterance the fake engine is speaking, if any.
    pub fn finish_line(&mut self, timeline: &mut StageTimeline) -> bool {
        let Some(ticket) = self.synth.finish() else {
            return false;
        };
        timeline.utterance_finished(ticket, &mut self.caps());
        true
    }

    /// Ends utterances until the engine falls silent.
    pub fn finish_all_lines(&mut self, timeline: &mut StageTimeline) {
        while self.finish_line(timeline) {}
    }

    /// Delivers a transcript on the open listening session.
    pub fn say(&mut self, timeline: &mut StageTimeline, transcript: &str) {
        let ticket = self
            .recognizer
            .listening()
            .expect("recognizer should be listening");
        timeline.transcript_received(ticket, transcript, &mut self.caps());
    }

    /// Picks `object` up at its home and releases it at `release`.
    pub fn drag_and_drop(
        &mut self,
        timeline: &mut StageTimeline,
        object: &str,
        release: Vector2,
    ) {
        let object = ObjectId::new(object);
        timeline.handle_pointer(
            PointerInput::Down {
                object: object.clone(),
                point: ROD_HOME,
            },
            &mut self.caps(),
        );
        timeline.handle_pointer(
            PointerInput::Up {
                object,
                point: release,
            },
            &mut self.caps(),
        );
    }

    pub fn tick(&mut self, timeline: &mut StageTimeline, at_ms: u64) {
        timeline.tick(ms(at_ms), &mut self.caps());
    }
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

pub fn event_types(events: &[TimelineEvent]) -> Vec<&'static str> {
    events.iter().map(|event| event.kind.event_type()).collect()
}

pub fn overview() -> Waypoint {
    Waypoint::new(
        Vector3::new(0.0, 6.0, 6.0),
        Vector3::default(),
        800,
        Easing::EaseInOutCubic,
    )
}

pub fn definition(stages: Vec<Stage>) -> ActivityDefinition {
    let mut waypoints = BTreeMap::new();
    waypoints.insert(WaypointId::new("overview"), overview());
    ActivityDefinition {
        id: ActivityId::new("number-rods"),
        sequence: DEFAULT_SEQUENCE.to_owned(),
        initial_camera: CameraPose::new(Vector3::new(0.0, 2.0, 8.0), Vector3::default()),
        waypoints,
        targets: vec![
            PlacementTarget::new("slot-1", SLOT_1, 0.5),
            PlacementTarget::new("slot-2", SLOT_2, 0.5),
        ],
        objects: vec![
            DraggableObject::new("rod-1", ROD_HOME),
            DraggableObject::new("rod-2", Vector2::new(6.0, 5.0)),
        ],
        stages,
        definition_hash: "fixture-hash".to_owned(),
    }
}

pub fn timeline(stages: Vec<Stage>) -> StageTimeline {
    StageTimeline::new(definition(stages), TimelineConfig::default())
        .expect("fixture definition should be valid")
}

pub fn narrate(id: &str, lines: &[&str]) -> Stage {
    Stage::new(id, StageKind::Narrate {
        lines: lines.iter().map(|line| NarrationLine::new(*line)).collect(),
    })
}

pub fn place(id: &str, targets: &[&str], required_hits: usize) -> Stage {
    Stage::new(id, StageKind::AwaitPlacement {
        targets: targets.iter().map(|target| TargetId::new(*target)).collect(),
        expected_object: None,
        required_hits,
        lines: Vec::new(),
    })
}

pub fn speech(id: &str, phrase: &str, lines: &[&str]) -> Stage {
    Stage::new(id, StageKind::AwaitSpeech {
        phrase: phrase.to_owned(),
        policy: MatchPolicy::default(),
        lines: lines.iter().map(|line| NarrationLine::new(*line)).collect(),
    })
}

pub fn pause(id: &str, duration_ms: u64) -> Stage {
    Stage::new(id, StageKind::Pause { duration_ms })
}
