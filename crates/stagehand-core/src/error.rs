//! Error types shared across the sequencer.

use thiserror::Error;

/// A malformed activity definition.
///
/// Configuration errors are raised while an activity is constructed and are
/// never produced mid-sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The activity declares no stages.
    #[error("activity {0} declares no stages")]
    EmptySequence(String),

    /// Two entries of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// What kind of entry was duplicated (stage, waypoint, target, object).
        kind: &'static str,
        /// The duplicated id.
        id: String,
    },

    /// A stage references a waypoint that is not defined.
    #[error("stage {stage} references unknown waypoint {waypoint}")]
    UnknownWaypoint {
        /// The referencing stage.
        stage: String,
        /// The missing waypoint id.
        waypoint: String,
    },

    /// A stage references a target zone that is not defined.
    #[error("stage {stage} references unknown target {target}")]
    UnknownTarget {
        /// The referencing stage.
        stage: String,
        /// The missing target id.
        target: String,
    },

    /// A stage references a draggable object that is not defined.
    #[error("stage {stage} references unknown object {object}")]
    UnknownObject {
        /// The referencing stage.
        stage: String,
        /// The missing object id.
        object: String,
    },

    /// A value is outside the range the sequencer accepts.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Failure reported by an external engine (speech synthesis or recognition).
///
/// These never propagate out of a stage: the owning collaborator absorbs them
/// and degrades.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// The engine does not exist in this environment.
    #[error("capability unavailable")]
    Unavailable,

    /// The user or platform denied access (e.g. microphone permission).
    #[error("capability denied")]
    Denied,

    /// The engine raised an error while working.
    #[error("engine error: {0}")]
    Engine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages_name_the_offending_ids() {
        let err = ConfigError::UnknownWaypoint {
            stage: "intro".to_owned(),
            waypoint: "overview".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "stage intro references unknown waypoint overview"
        );
    }

    #[test]
    fn test_capability_error_engine_message() {
        let err = CapabilityError::Engine("synthesis-failed".to_owned());

        assert_eq!(err.to_string(), "engine error: synthesis-failed");
    }
}
