//! Capability traits for the host's engines.
//!
//! Speech synthesis, speech recognition and the render surface are external.
//! They are injected per call through [`Capabilities`] instead of being reached
//! as process-wide singletons, so two activities never fight over one engine
//! and tests can substitute fakes.
//!
//! Engines report completion by having the host call back into the sequencer
//! with the ticket they were handed. Tickets carry the generation they were
//! issued under, which is how late callbacks are recognized as stale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::CapabilityError;
use crate::generation::Generation;
use crate::geometry::{CameraPose, Vector2};
use crate::ids::{ObjectId, VoiceId};

/// Identifies one utterance handed to the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId(pub u64);

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance-{}", self.0)
    }
}

/// Handle the synthesizer must hand back when an utterance ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceTicket {
    /// Generation the utterance was started under.
    pub generation: Generation,
    /// The utterance.
    pub id: UtteranceId,
}

/// Fully resolved speech parameters for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceRequest {
    /// Text to speak, already trimmed.
    pub text: String,
    /// Speaking rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Final volume in `[0, 1]`.
    pub volume: f32,
    /// Voice to use, if one was resolved.
    pub voice: Option<VoiceId>,
    /// BCP 47 language tag.
    pub lang: String,
}

/// A voice offered by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Engine identifier.
    pub id: VoiceId,
    /// Human-readable name (e.g. "Google US English").
    pub name: String,
    /// BCP 47 language tag.
    pub lang: String,
    /// Whether the platform marks this voice as its default.
    pub is_default: bool,
}

/// Text-to-speech engine.
pub trait SpeechSynthesizer {
    /// Returns false when speech synthesis is missing or disabled by the platform.
    fn available(&self) -> bool;

    /// Voices the engine can speak with.
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Starts speaking. The host reports the end of the utterance with `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError` if the engine refuses the utterance.
    fn speak(
        &mut self,
        ticket: UtteranceTicket,
        request: &UtteranceRequest,
    ) -> Result<(), CapabilityError>;

    /// Stops the in-flight utterance, if any.
    fn cancel(&mut self);
}

/// Handle the recognizer must hand back with each transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenTicket {
    /// Generation the listening session was opened under.
    pub generation: Generation,
    /// Session counter, unique per gate.
    pub session: u64,
}

/// Speech-recognition engine.
pub trait SpeechRecognizer {
    /// Returns false when recognition is missing or denied.
    fn available(&self) -> bool;

    /// Opens one listening session. The host reports transcripts with `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError` if the engine cannot start listening.
    fn listen(&mut self, ticket: ListenTicket, lang: &str) -> Result<(), CapabilityError>;

    /// Stops the open session, if any.
    fn stop(&mut self);
}

/// Render surface. The sequencer issues positions; it does not own geometry.
pub trait SceneSink {
    /// Moves the camera.
    fn set_camera(&mut self, pose: &CameraPose);

    /// Moves a draggable object.
    fn set_object_position(&mut self, object: &ObjectId, position: Vector2);
}

/// Recognizer for hosts without a microphone. Always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognizer;

impl SpeechRecognizer for NoRecognizer {
    fn available(&self) -> bool {
        false
    }

    fn listen(&mut self, _ticket: ListenTicket, _lang: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unavailable)
    }

    fn stop(&mut self) {}
}

/// Engine references passed into every sequencer call.
pub struct Capabilities<'a> {
    /// Text-to-speech engine.
    pub synthesizer: &'a mut dyn SpeechSynthesizer,
    /// Speech-recognition engine.
    pub recognizer: &'a mut dyn SpeechRecognizer,
    /// Render surface.
    pub scene: &'a mut dyn SceneSink,
    /// Wall clock for event timestamps.
    pub clock: &'a dyn Clock,
}

impl fmt::Debug for Capabilities<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("synthesizer_available", &self.synthesizer.available())
            .field("recognizer_available", &self.recognizer.available())
            .finish_non_exhaustive()
    }
}
