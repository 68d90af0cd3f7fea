//! The recognition gate.

use std::time::Duration;

use stagehand_core::capability::{ListenTicket, SpeechRecognizer};
use stagehand_core::clock::Clock;
use stagehand_core::error::CapabilityError;
use stagehand_core::generation::Generation;
use stagehand_core::schedule::Scheduler;
use tracing::{debug, info, trace, warn};

use crate::domain::attempt::RecognitionAttempt;
use crate::domain::events::GateEvent;
use crate::domain::matching::{MatchPolicy, evaluate};
use crate::domain::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Idle,
    Listening(ListenTicket),
    Waiting,
    Matched,
    Unavailable,
}

/// Waits for an expected phrase to be spoken.
///
/// One listening session is open at a time. A mismatch closes it and a retry
/// timer reopens it after the backoff delay; the frame loop drives that timer
/// through [`RecognitionGate::tick`].
#[derive(Debug)]
pub struct RecognitionGate {
    retry: RetryPolicy,
    language: String,
    state: GateState,
    expected: String,
    policy: MatchPolicy,
    generation: Generation,
    next_session: u64,
    misses: u32,
    attempts: Vec<RecognitionAttempt>,
    timers: Scheduler<()>,
}

impl RecognitionGate {
    /// Creates an idle gate listening in `language`.
    #[must_use]
    pub fn new(retry: RetryPolicy, language: impl Into<String>) -> Self {
        Self {
            retry,
            language: language.into(),
            state: GateState::Idle,
            expected: String::new(),
            policy: MatchPolicy::default(),
            generation: Generation::INITIAL,
            next_session: 0,
            misses: 0,
            attempts: Vec::new(),
            timers: Scheduler::new(),
        }
    }

    /// Returns true between `arm` and a terminal outcome or `disarm`.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, GateState::Listening(_) | GateState::Waiting)
    }

    /// Returns true once the phrase has been heard in this arming.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == GateState::Matched
    }

    /// The open session, if any.
    #[must_use]
    pub fn listening(&self) -> Option<ListenTicket> {
        match self.state {
            GateState::Listening(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// Transcripts evaluated since the last `arm`.
    #[must_use]
    pub fn attempts(&self) -> &[RecognitionAttempt] {
        &self.attempts
    }

    /// The phrase the gate is waiting for.
    #[must_use]
    pub fn expected_phrase(&self) -> &str {
        &self.expected
    }

    /// Starts waiting for `expected` and opens the first listening session.
    pub fn arm(
        &mut self,
        expected: &str,
        policy: MatchPolicy,
        generation: Generation,
        recognizer: &mut dyn SpeechRecognizer,
    ) -> GateEvent {
        self.disarm(recognizer);
        self.expected = expected.to_owned();
        self.policy = policy;
        self.generation = generation;
        self.misses = 0;
        self.attempts.clear();

        if !recognizer.available() {
            debug!(%generation, "speech recognition unavailable");
            self.state = GateState::Unavailable;
            return GateEvent::Unavailable {
                reason: "unavailable".to_owned(),
            };
        }
        self.open_session(recognizer)
    }

    /// Engine callback: a final transcript for `ticket`.
    ///
    /// Returns `None` for a ticket that is not the open session.
    pub fn transcript_received(
        &mut self,
        ticket: ListenTicket,
        transcript: &str,
        clock: &dyn Clock,
        now: Duration,
    ) -> Option<GateEvent> {
        if self.listening() != Some(ticket) {
            trace!(session = ticket.session, generation = %ticket.generation, "ignoring stale transcript");
            return None;
        }

        let verdict = evaluate(&self.expected, transcript, &self.policy);
        self.attempts.push(RecognitionAttempt {
            transcript: transcript.to_owned(),
            matched: verdict.is_some(),
            timestamp: clock.now(),
        });

        if let Some(kind) = verdict {
            info!(generation = %self.generation, ?kind, "expected phrase heard");
            self.state = GateState::Matched;
            return Some(GateEvent::Matched {
                transcript: transcript.to_owned(),
                kind,
            });
        }

        self.misses = self.misses.saturating_add(1);
        let retry_at = now + self.retry.delay(self.misses);
        debug!(generation = %self.generation, attempt = self.misses, ?retry_at, "transcript did not match");
        self.state = GateState::Waiting;
        self.timers.schedule(retry_at, self.generation, ());
        Some(GateEvent::RetryPrompt {
            attempt: self.misses,
            transcript: transcript.to_owned(),
            retry_at,
        })
    }

    /// Engine callback: the session for `ticket` ended without a transcript.
    /// Listening resumes after the base delay.
    pub fn listen_ended(&mut self, ticket: ListenTicket, now: Duration) {
        if self.listening() != Some(ticket) {
            return;
        }
        trace!(session = ticket.session, "listening ended without result");
        self.state = GateState::Waiting;
        self.timers
            .schedule(now + self.retry.base(), self.generation, ());
    }

    /// Engine callback: the session for `ticket` failed. Terminal for this
    /// arming.
    pub fn recognition_failed(
        &mut self,
        ticket: ListenTicket,
        error: &CapabilityError,
    ) -> Option<GateEvent> {
        if self.listening() != Some(ticket) {
            return None;
        }
        warn!(session = ticket.session, %error, "speech recognition failed");
        self.state = GateState::Unavailable;
        self.timers.clear();
        Some(GateEvent::Unavailable {
            reason: error.to_string(),
        })
    }

    /// Reopens listening once a retry is due.
    pub fn tick(&mut self, now: Duration, recognizer: &mut dyn SpeechRecognizer) -> Option<GateEvent> {
        if self.state != GateState::Waiting {
            return None;
        }
        self.timers.pop_due(now, self.generation)?;
        Some(self.open_session(recognizer))
    }

    /// Stops listening and drops any pending retry.
    pub fn disarm(&mut self, recognizer: &mut dyn SpeechRecognizer) {
        if matches!(self.state, GateState::Listening(_)) {
            recognizer.stop();
        }
        self.timers.clear();
        self.state = GateState::Idle;
    }

    fn open_session(&mut self, recognizer: &mut dyn SpeechRecognizer) -> GateEvent {
        self.next_session += 1;
        let ticket = ListenTicket {
            generation: self.generation,
            session: self.next_session,
        };
        match recognizer.listen(ticket, &self.language) {
            Ok(()) => {
                debug!(session = ticket.session, generation = %self.generation, "listening");
                self.state = GateState::Listening(ticket);
                GateEvent::Listening { ticket }
            }
            Err(err) => {
                warn!(error = %err, "could not start listening");
                self.state = GateState::Unavailable;
                GateEvent::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }
}
