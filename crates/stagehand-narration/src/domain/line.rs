//! A single spoken line.

use serde::{Deserialize, Serialize};
use stagehand_core::ids::VoiceId;

/// Default speaking rate for lesson narration.
pub const DEFAULT_RATE: f32 = 0.9;
/// Default pitch for lesson narration.
pub const DEFAULT_PITCH: f32 = 0.95;
/// Default per-line volume, before the master volume is applied.
pub const DEFAULT_VOLUME: f32 = 0.85;

/// One line of narration.
///
/// Deserializes either from a bare string (all defaults) or from a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LineSpec")]
pub struct NarrationLine {
    /// Text to speak.
    pub text: String,
    /// Silence before this line starts, in milliseconds.
    pub delay_ms: u64,
    /// Speaking rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Per-line volume, multiplied by the master narration volume.
    pub volume: f32,
    /// Explicit voice; when absent the queue picks the preferred voice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<VoiceId>,
}

impl NarrationLine {
    /// A line with default delivery.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay_ms: 0,
            rate: DEFAULT_RATE,
            pitch: DEFAULT_PITCH,
            volume: DEFAULT_VOLUME,
            voice_id: None,
        }
    }

    /// Sets the leading delay.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the per-line volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Sets an explicit voice.
    #[must_use]
    pub fn with_voice(mut self, voice: VoiceId) -> Self {
        self.voice_id = Some(voice);
        self
    }

    /// Returns true when the text is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LineSpec {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        delay_ms: u64,
        #[serde(default = "default_rate")]
        rate: f32,
        #[serde(default = "default_pitch")]
        pitch: f32,
        #[serde(default = "default_volume")]
        volume: f32,
        #[serde(default)]
        voice_id: Option<VoiceId>,
    },
}

fn default_rate() -> f32 {
    DEFAULT_RATE
}

fn default_pitch() -> f32 {
    DEFAULT_PITCH
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

impl From<LineSpec> for NarrationLine {
    fn from(spec: LineSpec) -> Self {
        match spec {
            LineSpec::Text(text) => Self::new(text),
            LineSpec::Full {
                text,
                delay_ms,
                rate,
                pitch,
                volume,
                voice_id,
            } => Self {
                text,
                delay_ms,
                rate,
                pitch,
                volume,
                voice_id,
            },
        }
    }
}
