//! Runner error types.

use stagehand_content::domain::errors::ContentError;
use thiserror::Error;

/// Startup errors for the runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The script could not be loaded or compiled.
    #[error("content error: {0}")]
    Content(#[from] ContentError),
}
