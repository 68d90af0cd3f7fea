//! Runner configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::RunnerError;

const DEFAULT_FRAME_HZ: u32 = 60;
const DEFAULT_MAX_SECONDS: u64 = 600;

/// Settings for one headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Path of the activity script.
    pub script: PathBuf,
    /// Sequence to run; the script's default when absent.
    pub sequence: Option<String>,
    /// Frame loop rate.
    pub frame_hz: u32,
    /// Speak narration into the log.
    pub voice_enabled: bool,
    /// Master narration volume.
    pub voice_volume: f32,
    /// Play the learner's part automatically.
    pub autopilot: bool,
    /// Give up after this long.
    pub max_runtime: Duration,
}

impl RunnerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Config` if `STAGEHAND_SCRIPT` is unset or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError::Config` if `STAGEHAND_SCRIPT` is missing or any
    /// value fails to parse or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let script = lookup("STAGEHAND_SCRIPT")
            .map(PathBuf::from)
            .ok_or_else(|| {
                RunnerError::Config("STAGEHAND_SCRIPT environment variable must be set".to_owned())
            })?;
        let sequence = lookup("STAGEHAND_SEQUENCE").filter(|name| !name.trim().is_empty());

        let frame_hz: u32 = parse(&lookup, "STAGEHAND_FRAME_HZ", DEFAULT_FRAME_HZ)?;
        if !(1..=240).contains(&frame_hz) {
            return Err(RunnerError::Config(format!(
                "STAGEHAND_FRAME_HZ must be between 1 and 240, got {frame_hz}"
            )));
        }

        let voice_enabled = parse_flag(&lookup, "STAGEHAND_VOICE_ENABLED", true)?;
        let voice_volume: f32 = parse(&lookup, "STAGEHAND_VOICE_VOLUME", 1.0)?;
        if !(0.0..=1.0).contains(&voice_volume) {
            return Err(RunnerError::Config(format!(
                "STAGEHAND_VOICE_VOLUME must be within [0, 1], got {voice_volume}"
            )));
        }

        let autopilot = parse_flag(&lookup, "STAGEHAND_AUTOPILOT", true)?;
        let max_seconds: u64 = parse(&lookup, "STAGEHAND_MAX_SECONDS", DEFAULT_MAX_SECONDS)?;

        Ok(Self {
            script,
            sequence,
            frame_hz,
            voice_enabled,
            voice_volume,
            autopilot,
            max_runtime: Duration::from_secs(max_seconds),
        })
    }

    /// Time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_hz.max(1)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, RunnerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| RunnerError::Config(format!("{key} is invalid: {e}"))),
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, RunnerError> {
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(RunnerError::Config(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
