//! The narration queue.
//!
//! Lines are spoken strictly one at a time. A line's `delay_ms` is the silence
//! before it starts, measured from the moment the queue became free for it
//! (enqueue on an idle queue, or the end of the previous line). Delays are
//! frame-loop timers stamped with the batch's generation.

use std::collections::VecDeque;
use std::time::Duration;

use stagehand_core::capability::{
    SpeechSynthesizer, UtteranceId, UtteranceRequest, UtteranceTicket,
};
use stagehand_core::generation::Generation;
use stagehand_core::schedule::{Scheduler, TimerId};
use tracing::{debug, trace, warn};

use crate::domain::events::NarrationEvent;
use crate::domain::line::NarrationLine;
use crate::domain::preferences::NarrationPreferences;
use crate::domain::voice::preferred_voice;

/// How new lines combine with what is already queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueMode {
    /// Queue after everything already pending.
    Append,
    /// Cancel the in-flight utterance and drop pending lines first.
    Interrupt,
}

/// Serialized, cancelable narration over one synthesizer.
#[derive(Debug)]
pub struct NarrationQueue {
    preferences: NarrationPreferences,
    pending: VecDeque<NarrationLine>,
    in_flight: Option<UtteranceTicket>,
    start_timer: Option<TimerId>,
    timers: Scheduler<()>,
    generation: Generation,
    next_utterance: u64,
}

impl NarrationQueue {
    /// Creates an idle queue.
    #[must_use]
    pub fn new(preferences: NarrationPreferences) -> Self {
        Self {
            preferences,
            pending: VecDeque::new(),
            in_flight: None,
            start_timer: None,
            timers: Scheduler::new(),
            generation: Generation::INITIAL,
            next_utterance: 0,
        }
    }

    /// Current preferences.
    #[must_use]
    pub fn preferences(&self) -> &NarrationPreferences {
        &self.preferences
    }

    /// Replaces the preferences. Muting cancels anything queued or speaking.
    pub fn set_preferences(
        &mut self,
        preferences: NarrationPreferences,
        synth: &mut dyn SpeechSynthesizer,
    ) {
        self.preferences = preferences;
        if self.preferences.is_muted() {
            self.cancel_all(synth);
        }
    }

    /// Returns true when lines enqueued now would actually be spoken.
    #[must_use]
    pub fn is_supported(&self, synth: &dyn SpeechSynthesizer) -> bool {
        !self.preferences.is_muted() && synth.available()
    }

    /// Lines waiting to start, not counting the one in flight.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true while an utterance is in flight.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns true when nothing is speaking or queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_empty()
    }

    /// The utterance currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> Option<UtteranceTicket> {
        self.in_flight
    }

    /// Queues `lines` under `generation` and starts speaking if idle.
    ///
    /// Blank lines are skipped. If narration is unsupported nothing is queued
    /// and `Unavailable` is returned; if nothing speakable remains on an idle
    /// queue, `Drained` is returned.
    pub fn enqueue(
        &mut self,
        lines: &[NarrationLine],
        mode: EnqueueMode,
        generation: Generation,
        now: Duration,
        synth: &mut dyn SpeechSynthesizer,
    ) -> Vec<NarrationEvent> {
        if mode == EnqueueMode::Interrupt || generation != self.generation {
            self.cancel_all(synth);
        }
        self.generation = generation;

        if !self.is_supported(synth) {
            debug!(%generation, muted = self.preferences.is_muted(), "narration unavailable");
            return vec![NarrationEvent::Unavailable { generation }];
        }

        self.pending
            .extend(lines.iter().filter(|line| !line.is_blank()).cloned());

        let mut events = Vec::new();
        if self.in_flight.is_none() && self.start_timer.is_none() {
            if self.pending.is_empty() {
                events.push(NarrationEvent::Drained { generation });
                return events;
            }
            self.schedule_head(now);
            self.start_due(now, synth, &mut events);
        }
        events
    }

    /// Clears pending lines and stops the in-flight utterance.
    pub fn cancel_all(&mut self, synth: &mut dyn SpeechSynthesizer) {
        self.pending.clear();
        self.start_timer = None;
        self.timers.clear();
        if let Some(ticket) = self.in_flight.take() {
            debug!(utterance = %ticket.id, "cancelling in-flight narration");
            synth.cancel();
        }
    }

    /// Starts the head line once its delay has elapsed.
    pub fn tick(&mut self, now: Duration, synth: &mut dyn SpeechSynthesizer) -> Vec<NarrationEvent> {
        let mut events = Vec::new();
        self.start_due(now, synth, &mut events);
        events
    }

    /// Engine callback: the utterance for `ticket` ended normally.
    pub fn utterance_finished(
        &mut self,
        ticket: UtteranceTicket,
        now: Duration,
        synth: &mut dyn SpeechSynthesizer,
    ) -> Vec<NarrationEvent> {
        self.complete(ticket, false, now, synth)
    }

    /// Engine callback: the utterance for `ticket` ended with an engine error.
    /// Treated like a finished line so the queue keeps moving.
    pub fn utterance_failed(
        &mut self,
        ticket: UtteranceTicket,
        now: Duration,
        synth: &mut dyn SpeechSynthesizer,
    ) -> Vec<NarrationEvent> {
        if self.in_flight == Some(ticket) {
            warn!(utterance = %ticket.id, "narration engine reported an error");
        }
        self.complete(ticket, true, now, synth)
    }

    fn complete(
        &mut self,
        ticket: UtteranceTicket,
        failed: bool,
        now: Duration,
        synth: &mut dyn SpeechSynthesizer,
    ) -> Vec<NarrationEvent> {
        if self.in_flight != Some(ticket) {
            trace!(utterance = %ticket.id, generation = %ticket.generation, "ignoring stale utterance callback");
            return Vec::new();
        }
        self.in_flight = None;

        let mut events = vec![NarrationEvent::LineFinished { ticket, failed }];
        self.after_line(now, synth, &mut events);
        events
    }

    fn after_line(
        &mut self,
        now: Duration,
        synth: &mut dyn SpeechSynthesizer,
        events: &mut Vec<NarrationEvent>,
    ) {
        if self.pending.is_empty() {
            events.push(NarrationEvent::Drained {
                generation: self.generation,
            });
            return;
        }
        self.schedule_head(now);
        self.start_due(now, synth, events);
    }

    fn schedule_head(&mut self, now: Duration) {
        if let Some(line) = self.pending.front() {
            let due = now + Duration::from_millis(line.delay_ms);
            self.start_timer = Some(self.timers.schedule(due, self.generation, ()));
        }
    }

    fn start_due(
        &mut self,
        now: Duration,
        synth: &mut dyn SpeechSynthesizer,
        events: &mut Vec<NarrationEvent>,
    ) {
        while self.timers.pop_due(now, self.generation).is_some() {
            self.start_timer = None;
            let Some(line) = self.pending.pop_front() else {
                break;
            };
            self.speak(&line, synth, events);
            if self.in_flight.is_none() {
                // speak() failed; the line counts as finished.
                self.after_line(now, synth, events);
            }
        }
    }

    fn speak(
        &mut self,
        line: &NarrationLine,
        synth: &mut dyn SpeechSynthesizer,
        events: &mut Vec<NarrationEvent>,
    ) {
        if let Some(previous) = self.in_flight.take() {
            debug!(utterance = %previous.id, "interrupting in-flight narration");
            synth.cancel();
        }

        self.next_utterance += 1;
        let ticket = UtteranceTicket {
            generation: self.generation,
            id: UtteranceId(self.next_utterance),
        };
        let voice = line.voice_id.clone().or_else(|| {
            preferred_voice(&synth.voices(), &self.preferences.language).map(|v| v.id.clone())
        });
        let request = UtteranceRequest {
            text: line.text.trim().to_owned(),
            rate: line.rate,
            pitch: line.pitch,
            volume: self.preferences.effective_volume(line.volume),
            voice,
            lang: self.preferences.language.clone(),
        };

        match synth.speak(ticket, &request) {
            Ok(()) => {
                debug!(utterance = %ticket.id, text = %request.text, "speaking narration line");
                self.in_flight = Some(ticket);
                events.push(NarrationEvent::LineStarted {
                    ticket,
                    text: request.text,
                });
            }
            Err(err) => {
                warn!(utterance = %ticket.id, error = %err, "narration engine refused line");
                events.push(NarrationEvent::LineFinished {
                    ticket,
                    failed: true,
                });
            }
        }
    }
}
