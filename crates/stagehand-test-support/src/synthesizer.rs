//! Fake speech synthesizer that records every call.

use stagehand_core::capability::{
    SpeechSynthesizer, UtteranceRequest, UtteranceTicket, VoiceInfo,
};
use stagehand_core::error::CapabilityError;

/// One call made against the fake engine, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthCall {
    /// `speak()` was called.
    Speak(UtteranceTicket, UtteranceRequest),
    /// `cancel()` was called.
    Cancel,
}

/// A synthesizer that never makes a sound. Utterances stay "speaking" until
/// the test calls [`FakeSynthesizer::finish`] or the code under test cancels.
#[derive(Debug)]
pub struct FakeSynthesizer {
    available: bool,
    fail_speak: bool,
    voices: Vec<VoiceInfo>,
    calls: Vec<SynthCall>,
    speaking: Option<UtteranceTicket>,
    overlapped: bool,
}

impl Default for FakeSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSynthesizer {
    /// An available engine with no voices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: true,
            fail_speak: false,
            voices: Vec::new(),
            calls: Vec::new(),
            speaking: None,
            overlapped: false,
        }
    }

    /// An engine that reports itself unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// An available engine whose `speak()` always errors.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_speak: true,
            ..Self::new()
        }
    }

    /// Replaces the voice catalog.
    #[must_use]
    pub fn with_voices(mut self, voices: Vec<VoiceInfo>) -> Self {
        self.voices = voices;
        self
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> &[SynthCall] {
        &self.calls
    }

    /// Every request passed to `speak()`, in order.
    #[must_use]
    pub fn spoken(&self) -> Vec<(UtteranceTicket, UtteranceRequest)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SynthCall::Speak(ticket, request) => Some((*ticket, request.clone())),
                SynthCall::Cancel => None,
            })
            .collect()
    }

    /// Texts passed to `speak()`, in order.
    #[must_use]
    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken()
            .into_iter()
            .map(|(_, request)| request.text)
            .collect()
    }

    /// Number of `cancel()` calls.
    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SynthCall::Cancel))
            .count()
    }

    /// The utterance currently "speaking".
    #[must_use]
    pub fn speaking(&self) -> Option<UtteranceTicket> {
        self.speaking
    }

    /// Returns true if `speak()` was ever called while another utterance was
    /// still speaking.
    #[must_use]
    pub fn overlapped(&self) -> bool {
        self.overlapped
    }

    /// Ends the current utterance and returns its ticket, as the engine's
    /// "utterance finished" callback would.
    pub fn finish(&mut self) -> Option<UtteranceTicket> {
        self.speaking.take()
    }

    /// Clears the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SpeechSynthesizer for FakeSynthesizer {
    fn available(&self) -> bool {
        self.available
    }

    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.clone()
    }

    fn speak(
        &mut self,
        ticket: UtteranceTicket,
        request: &UtteranceRequest,
    ) -> Result<(), CapabilityError> {
        self.calls.push(SynthCall::Speak(ticket, request.clone()));
        if self.fail_speak {
            return Err(CapabilityError::Engine("synthesis-failed".to_owned()));
        }
        if self.speaking.is_some() {
            self.overlapped = true;
        }
        self.speaking = Some(ticket);
        Ok(())
    }

    fn cancel(&mut self) {
        self.calls.push(SynthCall::Cancel);
        self.speaking = None;
    }
}
