//! Transcript normalization and phrase matching.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default fraction of expected words that must appear in a transcript.
pub const DEFAULT_MIN_KEYWORD_OVERLAP: f32 = 0.5;

/// How forgiving the comparison is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Fraction in `(0, 1]` of the phrase's distinct words that must be heard.
    pub min_keyword_overlap: f32,
    /// Words or short phrases that count as a match on their own.
    pub accepted_keywords: Vec<String>,
    /// Whether a transcript containing the whole phrase matches.
    pub allow_containment: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_keyword_overlap: DEFAULT_MIN_KEYWORD_OVERLAP,
            accepted_keywords: Vec::new(),
            allow_containment: true,
        }
    }
}

/// Which rule accepted a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// Normalized strings are equal.
    Exact,
    /// The transcript contains the whole phrase.
    Containment,
    /// Enough of the phrase's words were heard.
    KeywordOverlap,
    /// An accepted keyword was heard.
    AcceptedKeyword,
}

/// Lowercases, drops apostrophes, turns other punctuation into spaces and
/// collapses whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compares `transcript` against `expected` under `policy`.
///
/// Returns the first rule that accepts, or `None`. Empty transcripts never
/// match.
#[must_use]
pub fn evaluate(expected: &str, transcript: &str, policy: &MatchPolicy) -> Option<MatchKind> {
    let heard = normalize(transcript);
    if heard.is_empty() {
        return None;
    }
    let phrase = normalize(expected);

    if !phrase.is_empty() {
        if heard == phrase {
            return Some(MatchKind::Exact);
        }
        if policy.allow_containment && contains_words(&heard, &phrase) {
            return Some(MatchKind::Containment);
        }

        let heard_words: BTreeSet<&str> = heard.split(' ').collect();
        let phrase_words: BTreeSet<&str> = phrase.split(' ').collect();
        let found = phrase_words
            .iter()
            .filter(|word| heard_words.contains(*word))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let overlap = found as f32 / phrase_words.len() as f32;
        if overlap >= policy.min_keyword_overlap {
            return Some(MatchKind::KeywordOverlap);
        }
    }

    policy
        .accepted_keywords
        .iter()
        .map(|keyword| normalize(keyword))
        .any(|keyword| !keyword.is_empty() && contains_words(&heard, &keyword))
        .then_some(MatchKind::AcceptedKeyword)
}

/// Word-aligned containment on normalized text.
fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {haystack} ").contains(&format!(" {needle} "))
}
