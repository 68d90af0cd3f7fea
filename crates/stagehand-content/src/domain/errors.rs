//! Content error types.

use std::path::PathBuf;

use stagehand_core::error::ConfigError;
use thiserror::Error;

/// Failure to turn an authored script into a runnable definition.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// The script path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The script is not valid YAML or does not match the script schema.
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The requested sequence does not exist in the script.
    #[error("unknown sequence {requested}; available: {available}")]
    UnknownSequence {
        /// The name asked for.
        requested: String,
        /// Comma-separated names the script defines.
        available: String,
    },

    /// The selected sequence failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The definition could not be encoded for hashing.
    #[error("failed to encode definition: {0}")]
    Encode(#[from] serde_json::Error),
}
