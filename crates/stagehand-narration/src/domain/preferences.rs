//! Learner-level narration preferences.

use serde::{Deserialize, Serialize};
use stagehand_core::easing::clamp_unit;

/// Global narration settings shared by every line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationPreferences {
    /// Master switch for spoken narration.
    pub enabled: bool,
    /// Master volume in `[0, 1]`; out-of-range values are clamped on use.
    pub volume: f32,
    /// Language used for voice selection and utterances.
    pub language: String,
}

impl Default for NarrationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
            language: "en-US".to_owned(),
        }
    }
}

impl NarrationPreferences {
    /// The master volume clamped to `[0, 1]`.
    #[must_use]
    pub fn master_volume(&self) -> f32 {
        clamp_unit(self.volume)
    }

    /// Returns true when narration would be inaudible.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        !self.enabled || self.master_volume() <= 0.0
    }

    /// Final utterance volume for a line: per-line volume times master, in `[0, 1]`.
    #[must_use]
    pub fn effective_volume(&self, line_volume: f32) -> f32 {
        clamp_unit(line_volume * self.master_volume())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume_multiplies_and_clamps() {
        let prefs = NarrationPreferences {
            volume: 0.5,
            ..NarrationPreferences::default()
        };

        assert!((prefs.effective_volume(0.8) - 0.4).abs() < 1e-6);
        assert!((prefs.effective_volume(4.0) - 1.0).abs() < 1e-6);
        assert!(prefs.effective_volume(-1.0).abs() < 1e-6);
    }

    #[test]
    fn test_master_volume_above_one_is_clamped() {
        let prefs = NarrationPreferences {
            volume: 3.0,
            ..NarrationPreferences::default()
        };

        assert!((prefs.effective_volume(0.85) - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_or_silent_preferences_are_muted() {
        let disabled = NarrationPreferences {
            enabled: false,
            ..NarrationPreferences::default()
        };
        let silent = NarrationPreferences {
            volume: 0.0,
            ..NarrationPreferences::default()
        };

        assert!(disabled.is_muted());
        assert!(silent.is_muted());
        assert!(!NarrationPreferences::default().is_muted());
    }
}
