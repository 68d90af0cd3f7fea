//! Compiles an activity script into a runnable definition.

use sha2::{Digest, Sha256};
use stagehand_timeline::domain::activity::ActivityDefinition;
use tracing::{debug, info};

use crate::domain::errors::ContentError;
use crate::domain::script::ActivityScript;

/// Selects `sequence` from `script`, validates it, and stamps the result with
/// its definition hash.
///
/// # Errors
///
/// Returns `ContentError::UnknownSequence` if the sequence does not exist,
/// `ContentError::Config` if the selected definition is malformed (empty,
/// duplicate ids, dangling waypoint, target or object references, values out
/// of range).
pub fn compile(
    script: &ActivityScript,
    sequence: Option<&str>,
) -> Result<ActivityDefinition, ContentError> {
    let (name, stages) = script.select(sequence)?;
    debug!(activity_id = %script.id, sequence = name, stages = stages.len(), "compiling sequence");

    let mut definition = ActivityDefinition {
        id: script.id.clone(),
        sequence: name.to_owned(),
        initial_camera: script.initial_camera,
        waypoints: script.waypoints.clone(),
        targets: script.targets.clone(),
        objects: script.objects.clone(),
        stages: stages.to_vec(),
        definition_hash: String::new(),
    };
    definition.validate()?;
    definition.definition_hash = definition_hash(&definition)?;

    info!(
        activity_id = %definition.id,
        sequence = %definition.sequence,
        definition_hash = %definition.definition_hash,
        "sequence compiled"
    );
    Ok(definition)
}

/// SHA-256 of the canonical JSON encoding of `definition`, hex-encoded.
///
/// The `definition_hash` field itself is excluded, so re-hashing a stamped
/// definition yields the same value.
///
/// # Errors
///
/// Returns `ContentError::Encode` if the definition cannot be encoded.
pub fn definition_hash(definition: &ActivityDefinition) -> Result<String, ContentError> {
    let unstamped = ActivityDefinition {
        definition_hash: String::new(),
        ..definition.clone()
    };
    let bytes = serde_json::to_vec(&unstamped)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
