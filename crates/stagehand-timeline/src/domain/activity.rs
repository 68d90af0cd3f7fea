//! Activity definitions and construction-time validation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use stagehand_camera::domain::waypoint::Waypoint;
use stagehand_core::error::ConfigError;
use stagehand_core::geometry::CameraPose;
use stagehand_core::ids::{ActivityId, ObjectId, TargetId, WaypointId};
use stagehand_placement::domain::target::{DraggableObject, PlacementTarget};

use crate::domain::stage::{MotionDestination, Stage, StageKind};

/// Everything a timeline needs to run one sequence of an activity.
///
/// Built once when the activity mounts and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    /// Activity id.
    pub id: ActivityId,
    /// Name of the selected sequence.
    #[serde(default = "default_sequence_name")]
    pub sequence: String,
    /// Camera pose at mount and after every start.
    #[serde(default)]
    pub initial_camera: CameraPose,
    /// Named camera waypoints.
    #[serde(default)]
    pub waypoints: BTreeMap<WaypointId, Waypoint>,
    /// Drop targets.
    #[serde(default)]
    pub targets: Vec<PlacementTarget>,
    /// Draggable objects.
    #[serde(default)]
    pub objects: Vec<DraggableObject>,
    /// Stages, in order.
    pub stages: Vec<Stage>,
    /// Fingerprint of the authored definition, reported on completion.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub definition_hash: String,
}

/// Name used when an activity declares a single, unnamed sequence.
pub const DEFAULT_SEQUENCE: &str = "main";

fn default_sequence_name() -> String {
    DEFAULT_SEQUENCE.to_owned()
}

impl ActivityDefinition {
    /// Checks every cross-reference and value range.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found: an empty stage list, a duplicate
    /// id, a dangling waypoint, target or object reference, or a value out of
    /// range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::EmptySequence(self.id.to_string()));
        }

        let target_ids = unique_ids("target", self.targets.iter().map(|t| &t.id))?;
        let object_ids = unique_ids("object", self.objects.iter().map(|o| &o.id))?;
        unique_ids("stage", self.stages.iter().map(|s| &s.id))?;

        if !self.initial_camera.position.is_finite() || !self.initial_camera.look_at.is_finite() {
            return Err(invalid("initial_camera", "must be finite"));
        }
        for (id, waypoint) in &self.waypoints {
            if !waypoint.is_finite() {
                return Err(invalid(format!("waypoints.{id}"), "must be finite"));
            }
        }
        for target in &self.targets {
            if !target.center.is_finite() {
                return Err(invalid(format!("targets.{}.center", target.id), "must be finite"));
            }
            if !target.tolerance_radius.is_finite() || target.tolerance_radius <= 0.0 {
                return Err(invalid(
                    format!("targets.{}.tolerance_radius", target.id),
                    "must be a positive finite number",
                ));
            }
        }
        for object in &self.objects {
            if !object.home_position.is_finite() {
                return Err(invalid(format!("objects.{}.home", object.id), "must be finite"));
            }
        }

        for stage in &self.stages {
            self.validate_stage(stage, &target_ids, &object_ids)?;
        }
        self.validate_placement_order()
    }

    /// Rejects placement stages that cannot complete because earlier stages
    /// are certain to have filled their targets or seated their objects.
    /// Occupants are only cleared by a reset, so hits accumulate across a run.
    fn validate_placement_order(&self) -> Result<(), ConfigError> {
        let mut earlier: Vec<(&[TargetId], usize)> = Vec::new();
        let mut seated: BTreeSet<&ObjectId> = BTreeSet::new();

        for stage in &self.stages {
            let StageKind::AwaitPlacement {
                targets,
                expected_object,
                required_hits,
                ..
            } = &stage.kind
            else {
                continue;
            };
            let field = format!("stages.{}.required_hits", stage.id);

            let mut filled = 0;
            for (previous, hits) in &earlier {
                let elsewhere = previous.iter().filter(|t| !targets.contains(*t)).count();
                filled += hits.saturating_sub(elsewhere);
            }
            let free = targets.len().saturating_sub(filled);
            if *required_hits > free {
                return Err(invalid(
                    field,
                    format!("only {free} of the stage's targets are still free after earlier stages"),
                ));
            }

            let placed: usize = earlier.iter().map(|(_, hits)| hits).sum();
            let movable = self.objects.len().saturating_sub(placed);
            if *required_hits > movable {
                return Err(invalid(
                    field,
                    format!("only {movable} objects are still unplaced after earlier stages"),
                ));
            }

            if let Some(object) = expected_object {
                if *required_hits > 1 {
                    return Err(invalid(field, "must be 1 when an expected object is set"));
                }
                if !seated.insert(object) {
                    return Err(invalid(
                        format!("stages.{}.expected_object", stage.id),
                        format!("{object} is already placed by an earlier stage"),
                    ));
                }
            }
            earlier.push((targets.as_slice(), *required_hits));
        }
        Ok(())
    }

    fn validate_stage(
        &self,
        stage: &Stage,
        target_ids: &BTreeSet<&TargetId>,
        object_ids: &BTreeSet<&ObjectId>,
    ) -> Result<(), ConfigError> {
        let stage_name = stage.id.to_string();
        let unknown_target = |target: &TargetId| ConfigError::UnknownTarget {
            stage: stage_name.clone(),
            target: target.to_string(),
        };
        let unknown_object = |object: &ObjectId| ConfigError::UnknownObject {
            stage: stage_name.clone(),
            object: object.to_string(),
        };

        match &stage.kind {
            StageKind::Narrate { .. } => {}
            StageKind::Demo {
                waypoints, motion, ..
            } => {
                if let Some(missing) = waypoints.iter().find(|w| !self.waypoints.contains_key(*w)) {
                    return Err(ConfigError::UnknownWaypoint {
                        stage: stage_name.clone(),
                        waypoint: missing.to_string(),
                    });
                }
                if let Some(motion) = motion {
                    if !object_ids.contains(&motion.object) {
                        return Err(unknown_object(&motion.object));
                    }
                    match &motion.destination {
                        MotionDestination::Target(target) if !target_ids.contains(target) => {
                            return Err(unknown_target(target));
                        }
                        MotionDestination::Point(point) if !point.is_finite() => {
                            return Err(invalid(
                                format!("stages.{stage_name}.motion.destination"),
                                "must be finite",
                            ));
                        }
                        _ => {}
                    }
                }
            }
            StageKind::AwaitPlacement {
                targets,
                expected_object,
                required_hits,
                ..
            } => {
                if targets.is_empty() {
                    return Err(invalid(
                        format!("stages.{stage_name}.targets"),
                        "at least one target is required",
                    ));
                }
                if let Some(missing) = targets.iter().find(|t| !target_ids.contains(t)) {
                    return Err(unknown_target(missing));
                }
                unique_ids("target", targets.iter())?;
                if let Some(object) = expected_object.as_ref().filter(|o| !object_ids.contains(o)) {
                    return Err(unknown_object(object));
                }
                if *required_hits == 0 || *required_hits > targets.len() {
                    return Err(invalid(
                        format!("stages.{stage_name}.required_hits"),
                        format!("must be between 1 and {}", targets.len()),
                    ));
                }
            }
            StageKind::AwaitSpeech { phrase, policy, .. } => {
                if phrase.trim().is_empty() {
                    return Err(invalid(format!("stages.{stage_name}.phrase"), "must not be empty"));
                }
                let overlap = policy.min_keyword_overlap;
                if !(overlap > 0.0 && overlap <= 1.0) {
                    return Err(invalid(
                        format!("stages.{stage_name}.policy.min_keyword_overlap"),
                        "must be in (0, 1]",
                    ));
                }
            }
            StageKind::Pause { .. } => {}
        }
        Ok(())
    }

    /// Looks up a stage by position.
    #[must_use]
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }
}

fn unique_ids<'a, T, I>(kind: &'static str, ids: I) -> Result<BTreeSet<&'a T>, ConfigError>
where
    T: Ord + std::fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::easing::Easing;
    use stagehand_core::geometry::{Vector2, Vector3};
    use stagehand_core::ids::StageId;
    use stagehand_narration::domain::line::NarrationLine;
    use stagehand_recognition::domain::matching::MatchPolicy;

    use crate::domain::stage::ScriptedMotion;

    fn definition(stages: Vec<Stage>) -> ActivityDefinition {
        let mut waypoints = BTreeMap::new();
        waypoints.insert(
            WaypointId::new("overview"),
            Waypoint::new(Vector3::new(0.0, 5.0, 5.0), Vector3::default(), 800, Easing::EaseInOutCubic),
        );
        ActivityDefinition {
            id: ActivityId::new("number-rods"),
            sequence: DEFAULT_SEQUENCE.to_owned(),
            initial_camera: CameraPose::default(),
            waypoints,
            targets: vec![
                PlacementTarget::new("slot-1", Vector2::new(0.0, 0.0), 0.5),
                PlacementTarget::new("slot-2", Vector2::new(2.0, 0.0), 0.5),
            ],
            objects: vec![DraggableObject::new("rod-1", Vector2::new(5.0, 5.0))],
            stages,
            definition_hash: String::new(),
        }
    }

    fn narrate(id: &str) -> Stage {
        Stage::new(id, StageKind::Narrate {
            lines: vec![NarrationLine::new("Hello")],
        })
    }

    fn place(id: &str, targets: &[&str], required_hits: usize) -> Stage {
        Stage::new(id, StageKind::AwaitPlacement {
            targets: targets.iter().map(|t| TargetId::new(*t)).collect(),
            expected_object: None,
            required_hits,
            lines: Vec::new(),
        })
    }

    #[test]
    fn test_valid_definition_passes() {
        let def = with_two_rods(vec![narrate("intro"), place("place", &["slot-1", "slot-2"], 2)]);

        assert_eq!(def.validate(), Ok(()));
    }

    #[test]
    fn test_empty_stage_list_is_rejected() {
        let def = definition(Vec::new());

        assert_eq!(
            def.validate(),
            Err(ConfigError::EmptySequence("number-rods".to_owned()))
        );
    }

    #[test]
    fn test_duplicate_stage_ids_are_rejected() {
        let def = definition(vec![narrate("intro"), narrate("intro")]);

        assert_eq!(
            def.validate(),
            Err(ConfigError::DuplicateId {
                kind: "stage",
                id: "intro".to_owned()
            })
        );
    }

    #[test]
    fn test_unknown_waypoint_is_rejected() {
        let def = definition(vec![Stage::new("show", StageKind::Demo {
            waypoints: vec![WaypointId::new("closeup")],
            return_to_start: false,
            motion: None,
            lines: Vec::new(),
        })]);

        assert_eq!(
            def.validate(),
            Err(ConfigError::UnknownWaypoint {
                stage: "show".to_owned(),
                waypoint: "closeup".to_owned()
            })
        );
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let def = definition(vec![place("place", &["slot-9"], 1)]);

        assert!(matches!(
            def.validate(),
            Err(ConfigError::UnknownTarget { target, .. }) if target == "slot-9"
        ));
    }

    #[test]
    fn test_motion_to_unknown_object_is_rejected() {
        let def = definition(vec![Stage::new("show", StageKind::Demo {
            waypoints: Vec::new(),
            return_to_start: false,
            motion: Some(ScriptedMotion {
                object: ObjectId::new("cube"),
                destination: MotionDestination::Target(TargetId::new("slot-1")),
                duration_ms: 400,
                easing: Easing::EaseOutCubic,
                return_home: true,
            }),
            lines: Vec::new(),
        })]);

        assert!(matches!(
            def.validate(),
            Err(ConfigError::UnknownObject { object, .. }) if object == "cube"
        ));
    }

    #[test]
    fn test_required_hits_out_of_range_is_rejected() {
        let zero = definition(vec![place("place", &["slot-1"], 0)]);
        let too_many = definition(vec![place("place", &["slot-1"], 2)]);

        assert!(matches!(zero.validate(), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(too_many.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    fn place_object(id: &str, targets: &[&str], object: &str, required_hits: usize) -> Stage {
        Stage::new(id, StageKind::AwaitPlacement {
            targets: targets.iter().map(|t| TargetId::new(*t)).collect(),
            expected_object: Some(ObjectId::new(object)),
            required_hits,
            lines: Vec::new(),
        })
    }

    fn with_two_rods(stages: Vec<Stage>) -> ActivityDefinition {
        let mut def = definition(stages);
        def.objects
            .push(DraggableObject::new("rod-2", Vector2::new(6.0, 5.0)));
        def
    }

    #[test]
    fn test_target_filled_by_an_earlier_stage_is_rejected() {
        // Arrange
        let def = with_two_rods(vec![
            place("first", &["slot-1"], 1),
            place("second", &["slot-1"], 1),
        ]);

        // Act
        let result = def.validate();

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field, .. }) if field == "stages.second.required_hits"
        ));
    }

    #[test]
    fn test_later_stage_with_a_free_target_left_is_accepted() {
        let def = with_two_rods(vec![
            place("first", &["slot-1", "slot-2"], 1),
            place("second", &["slot-1", "slot-2"], 1),
        ]);

        assert_eq!(def.validate(), Ok(()));
    }

    #[test]
    fn test_later_stage_needing_more_hits_than_free_targets_is_rejected() {
        let def = with_two_rods(vec![
            place("first", &["slot-1", "slot-2"], 1),
            place("second", &["slot-1", "slot-2"], 2),
        ]);

        assert!(matches!(def.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_expected_object_with_several_hits_is_rejected() {
        // Arrange
        let def = with_two_rods(vec![place_object("place", &["slot-1", "slot-2"], "rod-1", 2)]);

        // Act
        let result = def.validate();

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { reason, .. }) if reason.contains("expected object")
        ));
    }

    #[test]
    fn test_more_hits_than_objects_is_rejected() {
        let def = definition(vec![place("place", &["slot-1", "slot-2"], 2)]);

        assert!(matches!(
            def.validate(),
            Err(ConfigError::InvalidValue { reason, .. }) if reason.contains("unplaced")
        ));
    }

    #[test]
    fn test_objects_used_up_by_earlier_stages_are_rejected() {
        let def = definition(vec![
            place("first", &["slot-1"], 1),
            place("second", &["slot-2"], 1),
        ]);

        assert!(matches!(
            def.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "stages.second.required_hits"
        ));
    }

    #[test]
    fn test_expected_object_placed_twice_is_rejected() {
        let def = with_two_rods(vec![
            place_object("first", &["slot-1"], "rod-1", 1),
            place_object("second", &["slot-2"], "rod-1", 1),
        ]);

        assert!(matches!(
            def.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "stages.second.expected_object"
        ));
    }

    #[test]
    fn test_empty_phrase_and_bad_overlap_are_rejected() {
        let empty = definition(vec![Stage::new("say", StageKind::AwaitSpeech {
            phrase: "  ".to_owned(),
            policy: MatchPolicy::default(),
            lines: Vec::new(),
        })]);
        let overlap = definition(vec![Stage::new("say", StageKind::AwaitSpeech {
            phrase: "ten".to_owned(),
            policy: MatchPolicy {
                min_keyword_overlap: 1.5,
                ..MatchPolicy::default()
            },
            lines: Vec::new(),
        })]);

        assert!(matches!(empty.validate(), Err(ConfigError::InvalidValue { field, .. }) if field == "stages.say.phrase"));
        assert!(matches!(overlap.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_non_positive_tolerance_is_rejected() {
        let mut def = definition(vec![narrate("intro")]);
        def.targets[0].tolerance_radius = 0.0;

        assert!(matches!(def.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_stage_lookup_by_index() {
        let def = definition(vec![narrate("intro")]);

        assert_eq!(def.stage(0).map(|s| &s.id), Some(&StageId::new("intro")));
        assert!(def.stage(1).is_none());
    }
}
