//! Runtime settings for a timeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stagehand_narration::domain::preferences::NarrationPreferences;
use stagehand_recognition::domain::retry::RetryPolicy;

/// Learner and host settings that are not part of an activity definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Narration switch, master volume and language.
    pub narration: NarrationPreferences,
    /// Duration of the return-home animation after a missed drop.
    pub return_home_ms: u64,
    /// Backoff between listening attempts.
    pub retry: RetryPolicy,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            narration: NarrationPreferences::default(),
            return_home_ms: 280,
            retry: RetryPolicy::default(),
        }
    }
}

impl TimelineConfig {
    /// The return-home duration.
    #[must_use]
    pub fn return_home(&self) -> Duration {
        Duration::from_millis(self.return_home_ms)
    }
}
