//! Headless stand-ins for the speech, recognition and render engines.

use std::collections::BTreeMap;
use std::time::Duration;

use stagehand_core::capability::{
    Capabilities, ListenTicket, SceneSink, SpeechRecognizer, SpeechSynthesizer, UtteranceRequest,
    UtteranceTicket, VoiceInfo,
};
use stagehand_core::clock::SystemClock;
use stagehand_core::error::CapabilityError;
use stagehand_core::geometry::{CameraPose, Vector2};
use stagehand_core::ids::{ObjectId, VoiceId};
use tracing::{debug, info, trace};

const MS_PER_WORD: u64 = 330;
const MIN_UTTERANCE: Duration = Duration::from_millis(500);

/// Writes narration to the log and "finishes" each line after an estimate of
/// how long it would take to say.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer {
    now: Duration,
    speaking: Option<(UtteranceTicket, Duration)>,
}

impl ConsoleSynthesizer {
    /// Creates an idle synthesizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the synthesizer's view of time and returns the utterance that
    /// finished by `now`, if any.
    pub fn poll_finished(&mut self, now: Duration) -> Option<UtteranceTicket> {
        self.now = now;
        match self.speaking {
            Some((ticket, done_at)) if done_at <= now => {
                self.speaking = None;
                Some(ticket)
            }
            _ => None,
        }
    }

    /// Returns true while a line is being "spoken".
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking.is_some()
    }
}

/// Rough speaking time for `text` at `rate`.
#[must_use]
pub fn estimate_duration(text: &str, rate: f32) -> Duration {
    let words = u64::try_from(text.split_whitespace().count()).unwrap_or(u64::MAX);
    let at_normal_rate = Duration::from_millis(words.saturating_mul(MS_PER_WORD));
    let scaled = if rate.is_finite() && rate > 0.1 && (rate - 1.0).abs() > f32::EPSILON {
        at_normal_rate.div_f32(rate)
    } else {
        at_normal_rate
    };
    scaled.max(MIN_UTTERANCE)
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn available(&self) -> bool {
        true
    }

    fn voices(&self) -> Vec<VoiceInfo> {
        vec![VoiceInfo {
            id: VoiceId::new("console"),
            name: "Console".to_owned(),
            lang: "en-US".to_owned(),
            is_default: true,
        }]
    }

    fn speak(
        &mut self,
        ticket: UtteranceTicket,
        request: &UtteranceRequest,
    ) -> Result<(), CapabilityError> {
        let duration = estimate_duration(&request.text, request.rate);
        info!(
            utterance = %ticket.id,
            volume = request.volume,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "narration: {}",
            request.text
        );
        self.speaking = Some((ticket, self.now + duration));
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some((ticket, _)) = self.speaking.take() {
            debug!(utterance = %ticket.id, "narration cut off");
        }
    }
}

/// A recognizer that only records the open session; answers are supplied by
/// the autopilot.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    enabled: bool,
    listening: Option<ListenTicket>,
}

impl ScriptedRecognizer {
    /// A recognizer that reports itself available when `enabled`.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            listening: None,
        }
    }

    /// The open session, if any.
    #[must_use]
    pub fn listening(&self) -> Option<ListenTicket> {
        self.listening
    }

    /// Closes the open session and returns its ticket.
    pub fn take_listening(&mut self) -> Option<ListenTicket> {
        self.listening.take()
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn available(&self) -> bool {
        self.enabled
    }

    fn listen(&mut self, ticket: ListenTicket, lang: &str) -> Result<(), CapabilityError> {
        if !self.enabled {
            return Err(CapabilityError::Unavailable);
        }
        info!(session = ticket.session, lang, "listening for an answer");
        self.listening = Some(ticket);
        Ok(())
    }

    fn stop(&mut self) {
        self.listening = None;
    }
}

/// Traces scene updates and remembers the latest state.
#[derive(Debug, Default)]
pub struct LoggingScene {
    camera: Option<CameraPose>,
    positions: BTreeMap<ObjectId, Vector2>,
}

impl LoggingScene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last camera pose applied.
    #[must_use]
    pub fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    /// The last position applied to `object`.
    #[must_use]
    pub fn position(&self, object: &ObjectId) -> Option<Vector2> {
        self.positions.get(object).copied()
    }
}

impl SceneSink for LoggingScene {
    fn set_camera(&mut self, pose: &CameraPose) {
        trace!(?pose, "camera");
        self.camera = Some(*pose);
    }

    fn set_object_position(&mut self, object: &ObjectId, position: Vector2) {
        trace!(object_id = %object, x = position.x, y = position.y, "object moved");
        self.positions.insert(object.clone(), position);
    }
}

/// The engines a headless run hands to the timeline.
#[derive(Debug)]
pub struct Host {
    /// Narration sink.
    pub synthesizer: ConsoleSynthesizer,
    /// Listening sessions.
    pub recognizer: ScriptedRecognizer,
    /// Scene sink.
    pub scene: LoggingScene,
    clock: SystemClock,
}

impl Host {
    /// Creates a host. Recognition is available only with the autopilot, which
    /// is the only thing that can answer.
    #[must_use]
    pub fn new(recognition: bool) -> Self {
        Self {
            synthesizer: ConsoleSynthesizer::new(),
            recognizer: ScriptedRecognizer::new(recognition),
            scene: LoggingScene::new(),
            clock: SystemClock,
        }
    }

    /// Borrows the engines for one timeline call.
    pub fn caps(&mut self) -> Capabilities<'_> {
        Capabilities {
            synthesizer: &mut self.synthesizer,
            recognizer: &mut self.recognizer,
            scene: &mut self.scene,
            clock: &self.clock,
        }
    }
}
