//! The authored activity script.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stagehand_camera::domain::waypoint::Waypoint;
use stagehand_core::error::ConfigError;
use stagehand_core::geometry::CameraPose;
use stagehand_core::ids::{ActivityId, WaypointId};
use stagehand_placement::domain::target::{DraggableObject, PlacementTarget};
use stagehand_timeline::domain::activity::DEFAULT_SEQUENCE;
use stagehand_timeline::domain::config::TimelineConfig;
use stagehand_timeline::domain::stage::Stage;

use crate::domain::errors::ContentError;

/// One activity as authored: a shared scene plus one or more sequences.
///
/// A script with a single sequence may list it under `stages`; it is then
/// known as `main`. Alternate sequences live under `sequences` and are chosen
/// by name before the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityScript {
    /// Activity id.
    pub id: ActivityId,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Camera pose at mount.
    #[serde(default)]
    pub initial_camera: CameraPose,
    /// Named camera waypoints shared by every sequence.
    #[serde(default)]
    pub waypoints: BTreeMap<WaypointId, Waypoint>,
    /// Drop targets shared by every sequence.
    #[serde(default)]
    pub targets: Vec<PlacementTarget>,
    /// Draggable objects shared by every sequence.
    #[serde(default)]
    pub objects: Vec<DraggableObject>,
    /// The unnamed sequence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<Stage>,
    /// Named sequences.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sequences: BTreeMap<String, Vec<Stage>>,
    /// Sequence used when none is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sequence: Option<String>,
    /// Runtime settings suggested by the author.
    #[serde(default)]
    pub settings: TimelineConfig,
}

impl ActivityScript {
    /// Names of every sequence in the script, `main` first if present.
    #[must_use]
    pub fn sequence_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.sequences.len() + 1);
        if !self.stages.is_empty() {
            names.push(DEFAULT_SEQUENCE);
        }
        names.extend(self.sequences.keys().map(String::as_str));
        names
    }

    /// Resolves a sequence by name.
    ///
    /// With no name, the script's `default_sequence` is used, then `main`,
    /// then the first named sequence.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::UnknownSequence` if nothing matches, and
    /// `ContentError::Config` if `main` is defined both ways.
    pub fn select(&self, requested: Option<&str>) -> Result<(&str, &[Stage]), ContentError> {
        if !self.stages.is_empty() && self.sequences.contains_key(DEFAULT_SEQUENCE) {
            return Err(ConfigError::DuplicateId {
                kind: "sequence",
                id: DEFAULT_SEQUENCE.to_owned(),
            }
            .into());
        }

        let name = match requested.or(self.default_sequence.as_deref()) {
            Some(name) => name,
            None if !self.stages.is_empty() => DEFAULT_SEQUENCE,
            None => self
                .sequences
                .keys()
                .next()
                .map_or(DEFAULT_SEQUENCE, String::as_str),
        };

        if name == DEFAULT_SEQUENCE && !self.stages.is_empty() {
            return Ok((DEFAULT_SEQUENCE, &self.stages));
        }
        self.sequences
            .get_key_value(name)
            .map(|(name, stages)| (name.as_str(), stages.as_slice()))
            .ok_or_else(|| ContentError::UnknownSequence {
                requested: name.to_owned(),
                available: self.sequence_names().join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SEQUENCES: &str = "\
id: number-rods
default_sequence: guided
sequences:
  guided:
    - id: intro
      kind: narrate
      lines: [Welcome]
  quick:
    - id: wait
      kind: pause
      duration_ms: 100
";

    #[test]
    fn test_select_uses_default_sequence_when_none_requested() {
        // Arrange
        let script: ActivityScript = serde_yaml::from_str(TWO_SEQUENCES).unwrap();

        // Act
        let (name, stages) = script.select(None).unwrap();

        // Assert
        assert_eq!(name, "guided");
        assert_eq!(stages.len(), 1);
    }

    #[test]
    fn test_select_by_name() {
        let script: ActivityScript = serde_yaml::from_str(TWO_SEQUENCES).unwrap();

        let (name, stages) = script.select(Some("quick")).unwrap();

        assert_eq!(name, "quick");
        assert_eq!(stages[0].kind.name(), "pause");
    }

    #[test]
    fn test_unknown_sequence_lists_available_names() {
        let script: ActivityScript = serde_yaml::from_str(TWO_SEQUENCES).unwrap();

        let err = script.select(Some("missing")).unwrap_err();

        match err {
            ContentError::UnknownSequence { requested, available } => {
                assert_eq!(requested, "missing");
                assert_eq!(available, "guided, quick");
            }
            other => panic!("expected UnknownSequence, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_stages_are_the_main_sequence() {
        let yaml = "id: solo\nstages:\n  - id: wait\n    kind: pause\n    duration_ms: 10\n";
        let script: ActivityScript = serde_yaml::from_str(yaml).unwrap();

        let (name, _) = script.select(None).unwrap();

        assert_eq!(name, "main");
        assert_eq!(script.sequence_names(), vec!["main"]);
    }

    #[test]
    fn test_main_defined_twice_is_rejected() {
        let yaml = "\
id: solo
stages:
  - { id: wait, kind: pause, duration_ms: 10 }
sequences:
  main:
    - { id: other, kind: pause, duration_ms: 10 }
";
        let script: ActivityScript = serde_yaml::from_str(yaml).unwrap();

        let err = script.select(None).unwrap_err();

        assert!(matches!(
            err,
            ContentError::Config(ConfigError::DuplicateId { kind: "sequence", .. })
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let yaml = "id: solo\nstagez: []\n";

        let result: Result<ActivityScript, _> = serde_yaml::from_str(yaml);

        assert!(result.is_err());
    }
}
