//! Fake speech recognizer that records listening sessions.

use stagehand_core::capability::{ListenTicket, SpeechRecognizer};
use stagehand_core::error::CapabilityError;

/// A recognizer whose transcripts are delivered by the test itself.
#[derive(Debug)]
pub struct FakeRecognizer {
    available: bool,
    fail_listen: bool,
    sessions: Vec<(ListenTicket, String)>,
    listening: Option<ListenTicket>,
    stop_count: usize,
}

impl Default for FakeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRecognizer {
    /// An available recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: true,
            fail_listen: false,
            sessions: Vec::new(),
            listening: None,
            stop_count: 0,
        }
    }

    /// A recognizer that reports itself unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A recognizer that claims availability but fails every `listen()`
    /// (e.g. microphone permission denied at prompt time).
    #[must_use]
    pub fn denied() -> Self {
        Self {
            fail_listen: true,
            ..Self::new()
        }
    }

    /// Every session opened, with the language requested.
    #[must_use]
    pub fn sessions(&self) -> &[(ListenTicket, String)] {
        &self.sessions
    }

    /// The open session, if any.
    #[must_use]
    pub fn listening(&self) -> Option<ListenTicket> {
        self.listening
    }

    /// Number of `stop()` calls.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }
}

impl SpeechRecognizer for FakeRecognizer {
    fn available(&self) -> bool {
        self.available
    }

    fn listen(&mut self, ticket: ListenTicket, lang: &str) -> Result<(), CapabilityError> {
        if !self.available {
            return Err(CapabilityError::Unavailable);
        }
        if self.fail_listen {
            return Err(CapabilityError::Denied);
        }
        self.sessions.push((ticket, lang.to_owned()));
        self.listening = Some(ticket);
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_count += 1;
        self.listening = None;
    }
}
