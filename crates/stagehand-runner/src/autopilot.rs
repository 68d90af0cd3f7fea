//! Plays the learner's part in a headless run.

use std::time::Duration;

use stagehand_placement::domain::target::DraggableObject;
use stagehand_timeline::application::controller::StageTimeline;
use stagehand_timeline::domain::input::PointerInput;
use stagehand_timeline::domain::stage::StageKind;
use tracing::debug;

/// Something the simulated learner does.
#[derive(Debug, Clone, PartialEq)]
pub enum LearnerAction {
    /// A pointer event.
    Pointer(PointerInput),
    /// A spoken answer.
    Say(String),
}

/// Answers every interactive stage correctly after a short think time.
#[derive(Debug)]
pub struct Autopilot {
    think_time: Duration,
    stage: Option<usize>,
    ready_at: Duration,
}

impl Autopilot {
    /// Creates an autopilot that waits `think_time` before each action.
    #[must_use]
    pub fn new(think_time: Duration) -> Self {
        Self {
            think_time,
            stage: None,
            ready_at: Duration::ZERO,
        }
    }

    /// Decides what to do at `now`. `listening` reports whether a recognizer
    /// session is open.
    pub fn plan(
        &mut self,
        timeline: &StageTimeline,
        listening: bool,
        now: Duration,
    ) -> Vec<LearnerAction> {
        let index = timeline.active_index();
        if index != self.stage {
            self.stage = index;
            self.ready_at = now + self.think_time;
            return Vec::new();
        }
        if now < self.ready_at {
            return Vec::new();
        }

        let actions = match timeline.active_stage().map(|stage| &stage.kind) {
            Some(StageKind::AwaitPlacement {
                targets,
                expected_object,
                ..
            }) => {
                let placement = timeline.placement();
                if placement.is_animating() {
                    return Vec::new();
                }
                let target = targets
                    .iter()
                    .filter_map(|id| placement.target(id))
                    .find(|target| !target.is_occupied());
                let is_free = |object: &&DraggableObject| {
                    !object.locked && placement.seat_of(&object.id).is_none()
                };
                let object = match expected_object {
                    Some(id) => placement.object(id).filter(is_free),
                    None => placement.objects().find(is_free),
                };
                match (object, target) {
                    (Some(object), Some(target)) => {
                        debug!(object_id = %object.id, target_id = %target.id, "autopilot placing");
                        vec![
                            LearnerAction::Pointer(PointerInput::Down {
                                object: object.id.clone(),
                                point: object.current_position,
                            }),
                            LearnerAction::Pointer(PointerInput::Move {
                                object: object.id.clone(),
                                point: target.center,
                            }),
                            LearnerAction::Pointer(PointerInput::Up {
                                object: object.id.clone(),
                                point: target.center,
                            }),
                        ]
                    }
                    _ => Vec::new(),
                }
            }
            Some(StageKind::AwaitSpeech { phrase, .. }) if listening => {
                debug!(%phrase, "autopilot answering");
                vec![LearnerAction::Say(phrase.clone())]
            }
            _ => Vec::new(),
        };

        if !actions.is_empty() {
            self.ready_at = now + self.think_time;
        }
        actions
    }
}
