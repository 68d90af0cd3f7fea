//! Preferred-voice selection.
//!
//! Platforms ship dozens of voices of very uneven quality. When a line does
//! not name a voice, pick one that matches the language and sounds natural.

use std::sync::LazyLock;

use regex::Regex;
use stagehand_core::capability::VoiceInfo;

/// Voice-name patterns, best first.
const NATURAL_VOICE_PATTERNS: [&str; 10] = [
    r"(?i)Google US English",
    r"(?i)Google UK English (Female|Male)",
    r"(?i)Google (Australian|Indian|Irish|South African) English",
    r"(?i)Siri",
    r"(?i)Samantha",
    r"(?i)Alex",
    r"(?i)Karen",
    r"(?i)Moira",
    r"(?i)Tessa",
    r"(?i)Microsoft (Aria|Jenny|Guy|Amber|Ana|Neural|Natural|Online)",
];

static NATURAL_VOICES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NATURAL_VOICE_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Picks the voice to use for `lang`.
///
/// Voices whose language shares `lang`'s primary subtag form the pool (all
/// voices if none do). Within the pool the first natural-voice pattern that
/// matches wins, then the platform default, then the first voice.
#[must_use]
pub fn preferred_voice<'a>(voices: &'a [VoiceInfo], lang: &str) -> Option<&'a VoiceInfo> {
    let prefix = lang.split('-').next().unwrap_or_default().to_lowercase();
    let language_matches: Vec<&VoiceInfo> = voices
        .iter()
        .filter(|voice| voice.lang.to_lowercase().starts_with(&prefix))
        .collect();
    let pool: Vec<&VoiceInfo> = if language_matches.is_empty() {
        voices.iter().collect()
    } else {
        language_matches
    };

    for pattern in NATURAL_VOICES.iter() {
        if let Some(voice) = pool.iter().find(|voice| pattern.is_match(&voice.name)) {
            return Some(*voice);
        }
    }

    pool.iter()
        .find(|voice| voice.is_default)
        .or_else(|| pool.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::ids::VoiceId;

    fn voice(id: &str, name: &str, lang: &str, is_default: bool) -> VoiceInfo {
        VoiceInfo {
            id: VoiceId::new(id),
            name: name.to_owned(),
            lang: lang.to_owned(),
            is_default,
        }
    }

    #[test]
    fn test_natural_voice_in_language_wins_over_default() {
        let voices = vec![
            voice("robot", "eSpeak English", "en-US", true),
            voice("samantha", "Samantha", "en-US", false),
            voice("google-de", "Google Deutsch", "de-DE", false),
        ];

        let chosen = preferred_voice(&voices, "en-US").unwrap();

        assert_eq!(chosen.id, VoiceId::new("samantha"));
    }

    #[test]
    fn test_pattern_order_beats_catalog_order() {
        let voices = vec![
            voice("alex", "Alex", "en-US", false),
            voice("google", "Google US English", "en-US", false),
        ];

        let chosen = preferred_voice(&voices, "en-US").unwrap();

        assert_eq!(chosen.id, VoiceId::new("google"));
    }

    #[test]
    fn test_falls_back_to_default_then_first() {
        let with_default = vec![
            voice("a", "Voice A", "en-GB", false),
            voice("b", "Voice B", "en-GB", true),
        ];
        let without_default = vec![voice("c", "Voice C", "fr-FR", false)];

        assert_eq!(
            preferred_voice(&with_default, "en-US").unwrap().id,
            VoiceId::new("b")
        );
        assert_eq!(
            preferred_voice(&without_default, "en-US").unwrap().id,
            VoiceId::new("c")
        );
    }

    #[test]
    fn test_empty_catalog_yields_none() {
        assert!(preferred_voice(&[], "en-US").is_none());
    }
}
