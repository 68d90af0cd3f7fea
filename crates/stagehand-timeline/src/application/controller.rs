//! The stage timeline controller.
//!
//! The host drives the controller from its frame loop with `tick(now)` and
//! forwards engine callbacks and pointer input as method calls. Each stage
//! activation is stamped with a fresh token; every leaf timer, tween and ticket
//! carries that token, so anything left over from an earlier stage or an
//! earlier run is recognized and dropped.

use std::time::Duration;

use stagehand_camera::application::choreographer::CameraChoreographer;
use stagehand_camera::domain::events::CameraEvent;
use stagehand_camera::domain::waypoint::Waypoint;
use stagehand_core::capability::{Capabilities, ListenTicket, UtteranceTicket};
use stagehand_core::clock::Clock;
use stagehand_core::error::{CapabilityError, ConfigError};
use stagehand_core::event::EventMetadata;
use stagehand_core::generation::{Generation, GenerationCounter};
use stagehand_core::geometry::CameraPose;
use stagehand_core::ids::StageId;
use stagehand_core::schedule::Scheduler;
use stagehand_narration::application::queue::{EnqueueMode, NarrationQueue};
use stagehand_narration::domain::events::NarrationEvent;
use stagehand_narration::domain::line::NarrationLine;
use stagehand_narration::domain::preferences::NarrationPreferences;
use stagehand_placement::application::validator::PlacementValidator;
use stagehand_placement::domain::events::{DropOutcome, PlacementEvent};
use stagehand_placement::domain::motion::MotionLeg;
use stagehand_recognition::application::gate::RecognitionGate;
use stagehand_recognition::domain::attempt::RecognitionAttempt;
use stagehand_recognition::domain::events::GateEvent;
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use crate::domain::activity::ActivityDefinition;
use crate::domain::config::TimelineConfig;
use crate::domain::events::{
    Modality, ModalityDegraded, PlacementHit, PlacementMissed, ResetReason, RetryPrompted,
    SequenceCompleted, SequenceReset, StageActivated, StageCompleted, TimelineEvent,
    TimelineEventKind,
};
use crate::domain::input::PointerInput;
use crate::domain::stage::{MotionDestination, ScriptedMotion, Stage, StageKind};

/// Which of a stage's completion conditions have fired.
#[derive(Debug, Default)]
struct StageProgress {
    narration_done: bool,
    camera_done: bool,
    motion_done: bool,
    hits: usize,
    listening: bool,
    matched: bool,
    pause_done: bool,
}

#[derive(Debug)]
struct ActiveStage {
    index: usize,
    token: Generation,
    progress: StageProgress,
}

/// Runs one activity sequence, one stage at a time.
#[derive(Debug)]
pub struct StageTimeline {
    definition: ActivityDefinition,
    config: TimelineConfig,
    generations: GenerationCounter,
    tokens: GenerationCounter,
    run_id: Uuid,
    running: bool,
    active: Option<ActiveStage>,
    now: Duration,
    narration: NarrationQueue,
    camera: CameraChoreographer,
    placement: PlacementValidator,
    gate: RecognitionGate,
    pauses: Scheduler<()>,
    sequence_number: u64,
    events: Vec<TimelineEvent>,
}

impl StageTimeline {
    /// Validates `definition` and builds an idle timeline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the definition is malformed.
    pub fn new(definition: ActivityDefinition, config: TimelineConfig) -> Result<Self, ConfigError> {
        definition.validate()?;
        let placement = PlacementValidator::new(
            definition.targets.clone(),
            definition.objects.clone(),
            config.return_home(),
        )?;
        Ok(Self {
            narration: NarrationQueue::new(config.narration.clone()),
            camera: CameraChoreographer::new(definition.initial_camera),
            gate: RecognitionGate::new(config.retry, config.narration.language.clone()),
            placement,
            definition,
            config,
            generations: GenerationCounter::new(),
            tokens: GenerationCounter::new(),
            run_id: Uuid::nil(),
            running: false,
            active: None,
            now: Duration::ZERO,
            pauses: Scheduler::new(),
            sequence_number: 0,
            events: Vec::new(),
        })
    }

    // ---- Lifecycle ----

    /// Starts a new run at stage 0.
    ///
    /// Returns `false` without doing anything if a run is in progress.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn start(&mut self, caps: &mut Capabilities<'_>) -> bool {
        if self.running {
            debug!("start ignored: already running");
            return false;
        }
        let generation = self.generations.advance();
        self.run_id = Uuid::new_v4();
        self.sequence_number = 0;
        self.reset_collaborators(caps);
        self.camera.set_pose(self.definition.initial_camera);
        caps.scene.set_camera(&self.camera.pose());
        self.running = true;
        info!(%generation, run_id = %self.run_id, sequence = %self.definition.sequence, "sequence started");

        self.activate(0, caps);
        self.settle(caps);
        true
    }

    /// Abandons the run and restores the initial object state. Never
    /// completes the sequence.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn reset(&mut self, caps: &mut Capabilities<'_>) {
        self.halt(ResetReason::Reset, caps);
    }

    /// Same as [`StageTimeline::reset`], reported as a stop.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn stop(&mut self, caps: &mut Capabilities<'_>) {
        self.halt(ResetReason::Stop, caps);
    }

    /// Per-frame driver. `now` is monotonic time since mount.
    #[instrument(level = "trace", skip(self, caps))]
    pub fn tick(&mut self, now: Duration, caps: &mut Capabilities<'_>) {
        self.now = self.now.max(now);
        let now = self.now;

        let spoken = self.narration.tick(now, caps.synthesizer);
        self.on_narration(spoken, caps);

        if self.camera.is_moving() {
            let settled = self.camera.tick(now);
            caps.scene.set_camera(&self.camera.pose());
            if let Some(CameraEvent::Settled { generation }) = settled {
                self.on_camera_settled(generation);
            }
        }

        self.placement.tick(now);
        self.flush_placement(caps);

        if let Some(event) = self.gate.tick(now, caps.recognizer) {
            self.on_gate(event, caps);
        }

        if let Some(active) = self.active.as_mut() {
            if self.pauses.pop_due(now, active.token).is_some() {
                active.progress.pause_done = true;
            }
        }

        self.settle(caps);
    }

    /// Replaces the narration preferences. Muting mid-stage completes any
    /// narration the stage was waiting on.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn set_narration_preferences(
        &mut self,
        preferences: NarrationPreferences,
        caps: &mut Capabilities<'_>,
    ) {
        self.config.narration = preferences.clone();
        self.narration.set_preferences(preferences, caps.synthesizer);
        if !self.narration.preferences().is_muted() {
            return;
        }
        let waiting = self
            .active
            .as_mut()
            .filter(|active| !active.progress.narration_done);
        if let Some(active) = waiting {
            active.progress.narration_done = true;
            self.degrade(Modality::Speech, "narration muted", caps.clock);
            self.begin_listening_if_due(caps);
            self.settle(caps);
        }
    }

    // ---- Engine callbacks ----

    /// The synthesizer finished the utterance for `ticket`.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn utterance_finished(&mut self, ticket: UtteranceTicket, caps: &mut Capabilities<'_>) {
        let events = self
            .narration
            .utterance_finished(ticket, self.now, caps.synthesizer);
        self.on_narration(events, caps);
        self.settle(caps);
    }

    /// The synthesizer failed while speaking the utterance for `ticket`.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn utterance_failed(&mut self, ticket: UtteranceTicket, caps: &mut Capabilities<'_>) {
        let events = self
            .narration
            .utterance_failed(ticket, self.now, caps.synthesizer);
        self.on_narration(events, caps);
        self.settle(caps);
    }

    /// The recognizer produced a final transcript for `ticket`.
    #[instrument(skip(self, transcript, caps), fields(activity_id = %self.definition.id))]
    pub fn transcript_received(
        &mut self,
        ticket: ListenTicket,
        transcript: &str,
        caps: &mut Capabilities<'_>,
    ) {
        if !self.accepts(ticket.generation) {
            trace!("discarding transcript from a previous stage");
            return;
        }
        if let Some(event) = self
            .gate
            .transcript_received(ticket, transcript, caps.clock, self.now)
        {
            self.on_gate(event, caps);
        }
        self.settle(caps);
    }

    /// The recognizer session for `ticket` ended without a transcript.
    #[instrument(skip(self, _caps), fields(activity_id = %self.definition.id))]
    pub fn listen_ended(&mut self, ticket: ListenTicket, _caps: &mut Capabilities<'_>) {
        if self.accepts(ticket.generation) {
            self.gate.listen_ended(ticket, self.now);
        }
    }

    /// The recognizer session for `ticket` failed.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn recognition_failed(
        &mut self,
        ticket: ListenTicket,
        error: &CapabilityError,
        caps: &mut Capabilities<'_>,
    ) {
        if !self.accepts(ticket.generation) {
            trace!("discarding recognition failure from a previous stage");
            return;
        }
        if let Some(event) = self.gate.recognition_failed(ticket, error) {
            self.on_gate(event, caps);
        }
        self.settle(caps);
    }

    // ---- Pointer input ----

    /// Applies one normalized pointer event. Returns the drop outcome for
    /// `Up`; rejected input is logged and ignored.
    #[instrument(skip(self, caps), fields(activity_id = %self.definition.id))]
    pub fn handle_pointer(
        &mut self,
        input: PointerInput,
        caps: &mut Capabilities<'_>,
    ) -> Option<DropOutcome> {
        let now = self.now;
        let outcome = match input {
            PointerInput::Down { object, point } => {
                if let Err(err) = self.placement.begin_drag(&object, point) {
                    debug!(object_id = %object, error = %err, "drag rejected");
                }
                None
            }
            PointerInput::Move { object, point } => {
                if let Err(err) = self.placement.drag_to(&object, point) {
                    trace!(object_id = %object, error = %err, "move ignored");
                }
                None
            }
            PointerInput::Cancel { object } => {
                if let Err(err) = self.placement.cancel_drag(&object, now) {
                    trace!(object_id = %object, error = %err, "cancel ignored");
                }
                None
            }
            PointerInput::Up { object, point } => {
                match self.placement.drop_object(&object, point, now) {
                    Ok(outcome) => {
                        self.on_drop(&outcome, caps.clock);
                        Some(outcome)
                    }
                    Err(err) => {
                        debug!(object_id = %object, error = %err, "drop rejected");
                        None
                    }
                }
            }
        };
        self.flush_placement(caps);
        self.settle(caps);
        outcome
    }

    // ---- Observers ----

    /// Drains the signal buffer.
    pub fn take_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending signals, oldest first.
    #[must_use]
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// The active stage, if any.
    #[must_use]
    pub fn active_stage(&self) -> Option<&Stage> {
        self.active
            .as_ref()
            .and_then(|active| self.definition.stage(active.index))
    }

    /// Position of the active stage, if any.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    /// Returns true between `start` and completion, reset or stop.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    /// Id of the current (or last) run.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The definition being run.
    #[must_use]
    pub fn definition(&self) -> &ActivityDefinition {
        &self.definition
    }

    /// The last camera pose issued.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    /// Targets and objects as they stand now.
    #[must_use]
    pub fn placement(&self) -> &PlacementValidator {
        &self.placement
    }

    /// The narration queue.
    #[must_use]
    pub fn narration(&self) -> &NarrationQueue {
        &self.narration
    }

    /// Spoken answers evaluated in the current speech stage.
    #[must_use]
    pub fn recognition_attempts(&self) -> &[RecognitionAttempt] {
        self.gate.attempts()
    }

    // ---- Stage dispatch ----

    fn activate(&mut self, index: usize, caps: &mut Capabilities<'_>) {
        let Some(stage) = self.definition.stage(index).cloned() else {
            return;
        };
        let token = self.tokens.advance();
        self.active = Some(ActiveStage {
            index,
            token,
            progress: StageProgress::default(),
        });
        info!(stage_id = %stage.id, index, kind = stage.kind.name(), "stage activated");
        self.emit(
            TimelineEventKind::StageActivated(StageActivated {
                stage_id: stage.id.clone(),
                index,
                kind: stage.kind.name().to_owned(),
            }),
            caps.clock,
        );

        let now = self.now;
        match &stage.kind {
            StageKind::Narrate { lines } => self.narrate(lines, token, caps),
            StageKind::Demo {
                waypoints,
                return_to_start,
                motion,
                lines,
            } => {
                let mut legs: Vec<Waypoint> = waypoints
                    .iter()
                    .filter_map(|id| self.definition.waypoints.get(id).copied())
                    .collect();
                if *return_to_start {
                    let back = legs
                        .last()
                        .map(|last| Waypoint::toward(self.camera.pose(), last));
                    legs.extend(back);
                }
                if let Some(CameraEvent::Settled { generation }) =
                    self.camera.follow(legs, token, now)
                {
                    self.on_camera_settled(generation);
                }

                match motion {
                    Some(motion) => self.start_motion(motion, token, caps),
                    None => self.mark(token, |progress| progress.motion_done = true),
                }
                self.narrate(lines, token, caps);
            }
            StageKind::AwaitPlacement {
                targets,
                expected_object,
                lines,
                ..
            } => {
                if let Err(err) = self.placement.arm(targets, expected_object.clone(), token) {
                    warn!(stage_id = %stage.id, error = %err, "could not arm placement");
                }
                self.narrate(lines, token, caps);
            }
            StageKind::AwaitSpeech { lines, .. } => {
                self.narrate(lines, token, caps);
                self.begin_listening_if_due(caps);
            }
            StageKind::Pause { duration_ms } => {
                self.mark(token, |progress| progress.narration_done = true);
                if *duration_ms == 0 {
                    self.mark(token, |progress| progress.pause_done = true);
                } else {
                    self.pauses
                        .schedule(now + Duration::from_millis(*duration_ms), token, ());
                }
            }
        }
    }

    fn narrate(&mut self, lines: &[NarrationLine], token: Generation, caps: &mut Capabilities<'_>) {
        if lines.iter().all(NarrationLine::is_blank) {
            self.narration.cancel_all(caps.synthesizer);
            self.mark(token, |progress| progress.narration_done = true);
            return;
        }
        let events = self.narration.enqueue(
            lines,
            EnqueueMode::Interrupt,
            token,
            self.now,
            caps.synthesizer,
        );
        self.on_narration(events, caps);
    }

    fn start_motion(&mut self, motion: &ScriptedMotion, token: Generation, caps: &mut Capabilities<'_>) {
        let home = self
            .placement
            .object(&motion.object)
            .map(|object| object.home_position);
        let destination = match &motion.destination {
            MotionDestination::Target(target) => {
                self.placement.target(target).map(|target| target.center)
            }
            MotionDestination::Point(point) => Some(*point),
        };
        let (Some(home), Some(destination)) = (home, destination) else {
            warn!(object_id = %motion.object, "scripted motion skipped: unresolved object or destination");
            self.mark(token, |progress| progress.motion_done = true);
            return;
        };

        let mut legs = vec![MotionLeg::new(destination, motion.duration_ms, motion.easing)];
        if motion.return_home {
            legs.push(MotionLeg::new(home, motion.duration_ms, motion.easing));
        }
        if let Err(err) = self
            .placement
            .script_motion(&motion.object, legs, token, self.now)
        {
            warn!(object_id = %motion.object, error = %err, "scripted motion rejected");
            self.mark(token, |progress| progress.motion_done = true);
        }
        self.flush_placement(caps);
    }

    fn begin_listening_if_due(&mut self, caps: &mut Capabilities<'_>) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.progress.listening || !active.progress.narration_done {
            return;
        }
        let Some(StageKind::AwaitSpeech { phrase, policy, .. }) =
            self.definition.stages.get(active.index).map(|stage| &stage.kind)
        else {
            return;
        };
        active.progress.listening = true;
        let token = active.token;
        let event = self.gate.arm(phrase, policy.clone(), token, caps.recognizer);
        self.on_gate(event, caps);
    }

    // ---- Collaborator signals ----

    fn on_narration(&mut self, events: Vec<NarrationEvent>, caps: &mut Capabilities<'_>) {
        for event in events {
            match event {
                NarrationEvent::LineStarted { ticket, text } => {
                    debug!(utterance = %ticket.id, %text, "narration line started");
                }
                NarrationEvent::LineFinished { ticket, failed } => {
                    trace!(utterance = %ticket.id, failed, "narration line finished");
                }
                NarrationEvent::Drained { generation } => {
                    self.mark(generation, |progress| progress.narration_done = true);
                    self.begin_listening_if_due(caps);
                }
                NarrationEvent::Unavailable { generation } => {
                    if self.accepts(generation) {
                        self.mark(generation, |progress| progress.narration_done = true);
                        self.degrade(Modality::Speech, "narration unavailable", caps.clock);
                        self.begin_listening_if_due(caps);
                    }
                }
            }
        }
    }

    fn on_camera_settled(&mut self, token: Generation) {
        self.mark(token, |progress| progress.camera_done = true);
    }

    fn flush_placement(&mut self, caps: &mut Capabilities<'_>) {
        for event in self.placement.take_events() {
            match event {
                PlacementEvent::ObjectMoved { object, position } => {
                    caps.scene.set_object_position(&object, position);
                }
                PlacementEvent::MotionSettled { object, generation } => {
                    debug!(object_id = %object, "scripted motion settled");
                    self.mark(generation, |progress| progress.motion_done = true);
                }
            }
        }
    }

    fn on_gate(&mut self, event: GateEvent, caps: &mut Capabilities<'_>) {
        let Some(token) = self.active.as_ref().map(|active| active.token) else {
            return;
        };
        match event {
            GateEvent::Listening { ticket } => {
                debug!(session = ticket.session, "listening for phrase");
            }
            GateEvent::Matched { transcript, kind } => {
                info!(%transcript, ?kind, "phrase matched");
                self.mark(token, |progress| progress.matched = true);
            }
            GateEvent::RetryPrompt {
                attempt,
                transcript,
                retry_at,
            } => {
                let Some(stage_id) = self.active_stage_id() else {
                    return;
                };
                let retry_in = retry_at.saturating_sub(self.now);
                self.emit(
                    TimelineEventKind::RetryPrompted(RetryPrompted {
                        stage_id,
                        attempt,
                        transcript,
                        retry_in_ms: u64::try_from(retry_in.as_millis()).unwrap_or(u64::MAX),
                    }),
                    caps.clock,
                );
            }
            GateEvent::Unavailable { reason } => {
                self.mark(token, |progress| progress.matched = true);
                self.degrade(Modality::Recognition, &reason, caps.clock);
            }
        }
    }

    fn on_drop(&mut self, outcome: &DropOutcome, clock: &dyn Clock) {
        let stage_id = self.active_stage_id();
        match outcome {
            DropOutcome::Hit { object, target, .. } => {
                let required_hits = match self.active_stage().map(|stage| &stage.kind) {
                    Some(StageKind::AwaitPlacement { required_hits, .. }) => *required_hits,
                    _ => 0,
                };
                let hits = match self.active.as_mut() {
                    Some(active) => {
                        active.progress.hits += 1;
                        active.progress.hits
                    }
                    None => 0,
                };
                if hits >= required_hits {
                    self.placement.disarm();
                }
                self.emit(
                    TimelineEventKind::PlacementHit(PlacementHit {
                        stage_id,
                        object_id: object.clone(),
                        target_id: target.clone(),
                        hits,
                        required_hits,
                    }),
                    clock,
                );
            }
            DropOutcome::Miss { object, reason, .. } => {
                self.emit(
                    TimelineEventKind::PlacementMissed(PlacementMissed {
                        stage_id,
                        object_id: object.clone(),
                        reason: *reason,
                    }),
                    clock,
                );
            }
        }
    }

    // ---- Advancement ----

    fn is_complete(&self, active: &ActiveStage) -> bool {
        let progress = &active.progress;
        match self.definition.stage(active.index).map(|stage| &stage.kind) {
            Some(StageKind::Narrate { .. }) => progress.narration_done,
            Some(StageKind::Demo { .. }) => {
                progress.camera_done && progress.motion_done && progress.narration_done
            }
            Some(StageKind::AwaitPlacement { required_hits, .. }) => {
                progress.hits >= *required_hits
            }
            Some(StageKind::AwaitSpeech { .. }) => progress.matched,
            Some(StageKind::Pause { .. }) => progress.pause_done,
            None => true,
        }
    }

    /// Advances through every stage whose conditions already hold. Runs as a
    /// loop so a chain of immediately-complete stages keeps strict order.
    fn settle(&mut self, caps: &mut Capabilities<'_>) {
        while let Some(active) = self.active.as_ref() {
            if !self.is_complete(active) {
                return;
            }
            let index = active.index;
            self.active = None;
            self.finish_stage(index, caps);

            if index + 1 < self.definition.stages.len() {
                self.activate(index + 1, caps);
            } else {
                self.complete(caps.clock);
            }
        }
    }

    fn finish_stage(&mut self, index: usize, caps: &mut Capabilities<'_>) {
        let Some(stage) = self.definition.stage(index) else {
            return;
        };
        let stage_id = stage.id.clone();
        match stage.kind {
            StageKind::AwaitPlacement { .. } => self.placement.disarm(),
            StageKind::AwaitSpeech { .. } => self.gate.disarm(caps.recognizer),
            _ => {}
        }
        self.pauses.clear();
        info!(stage_id = %stage_id, index, "stage completed");
        self.emit(
            TimelineEventKind::StageCompleted(StageCompleted { stage_id, index }),
            caps.clock,
        );
    }

    fn complete(&mut self, clock: &dyn Clock) {
        self.running = false;
        info!(
            activity_id = %self.definition.id,
            sequence = %self.definition.sequence,
            run_id = %self.run_id,
            "sequence completed"
        );
        self.emit(
            TimelineEventKind::SequenceCompleted(SequenceCompleted {
                activity_id: self.definition.id.clone(),
                sequence: self.definition.sequence.clone(),
                definition_hash: self.definition.definition_hash.clone(),
            }),
            clock,
        );
    }

    fn halt(&mut self, reason: ResetReason, caps: &mut Capabilities<'_>) {
        let interrupted_stage = self.active_stage_id();
        let generation = self.generations.advance();
        self.running = false;
        self.reset_collaborators(caps);
        info!(%generation, ?reason, interrupted_stage = ?interrupted_stage, "sequence reset");
        self.emit(
            TimelineEventKind::SequenceReset(SequenceReset {
                reason,
                interrupted_stage,
            }),
            caps.clock,
        );
    }

    fn reset_collaborators(&mut self, caps: &mut Capabilities<'_>) {
        self.active = None;
        self.narration.cancel_all(caps.synthesizer);
        self.camera.cancel_all();
        self.gate.disarm(caps.recognizer);
        self.pauses.clear();
        self.placement.reset();
        self.flush_placement(caps);
    }

    // ---- Helpers ----

    fn accepts(&self, token: Generation) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.token == token)
    }

    fn mark(&mut self, token: Generation, update: impl FnOnce(&mut StageProgress)) {
        match self.active.as_mut() {
            Some(active) if active.token == token => update(&mut active.progress),
            _ => trace!(%token, "ignoring signal from an inactive stage"),
        }
    }

    fn active_stage_id(&self) -> Option<StageId> {
        self.active_stage().map(|stage| stage.id.clone())
    }

    fn degrade(&mut self, modality: Modality, reason: &str, clock: &dyn Clock) {
        let Some(stage_id) = self.active_stage_id() else {
            return;
        };
        warn!(stage_id = %stage_id, ?modality, reason, "modality degraded");
        self.emit(
            TimelineEventKind::ModalityDegraded(ModalityDegraded {
                stage_id,
                modality,
                reason: reason.to_owned(),
            }),
            clock,
        );
    }

    fn emit(&mut self, kind: TimelineEventKind, clock: &dyn Clock) {
        self.sequence_number += 1;
        self.events.push(TimelineEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                run_id: self.run_id,
                generation: self.generations.current(),
                sequence_number: self.sequence_number,
                occurred_at: clock.now(),
            },
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::ids::ActivityId;
    use stagehand_test_support::{FakeRecognizer, FakeSynthesizer, RecordingScene, fixed_clock};

    use crate::domain::activity::DEFAULT_SEQUENCE;

    fn definition(stages: Vec<Stage>) -> ActivityDefinition {
        ActivityDefinition {
            id: ActivityId::new("counting"),
            sequence: DEFAULT_SEQUENCE.to_owned(),
            initial_camera: CameraPose::default(),
            waypoints: std::collections::BTreeMap::new(),
            targets: Vec::new(),
            objects: Vec::new(),
            stages,
            definition_hash: String::new(),
        }
    }

    #[test]
    fn test_new_rejects_an_empty_sequence() {
        let result = StageTimeline::new(definition(Vec::new()), TimelineConfig::default());

        assert!(matches!(result, Err(ConfigError::EmptySequence(_))));
    }

    #[test]
    fn test_tick_before_start_is_inert() {
        // Arrange
        let mut synth = FakeSynthesizer::new();
        let mut recognizer = FakeRecognizer::new();
        let mut scene = RecordingScene::new();
        let clock = fixed_clock();
        let mut caps = Capabilities {
            synthesizer: &mut synth,
            recognizer: &mut recognizer,
            scene: &mut scene,
            clock: &clock,
        };
        let mut timeline = StageTimeline::new(
            definition(vec![Stage::new("wait", StageKind::Pause { duration_ms: 10 })]),
            TimelineConfig::default(),
        )
        .unwrap();

        // Act
        timeline.tick(Duration::from_secs(1), &mut caps);

        // Assert
        assert!(!timeline.is_running());
        assert!(timeline.events().is_empty());
        assert_eq!(timeline.generation(), GenerationCounter::new().current());
    }

    #[test]
    fn test_zero_length_pause_sequence_completes_inside_start() {
        // Arrange
        let mut synth = FakeSynthesizer::new();
        let mut recognizer = FakeRecognizer::new();
        let mut scene = RecordingScene::new();
        let clock = fixed_clock();
        let mut caps = Capabilities {
            synthesizer: &mut synth,
            recognizer: &mut recognizer,
            scene: &mut scene,
            clock: &clock,
        };
        let mut timeline = StageTimeline::new(
            definition(vec![
                Stage::new("a", StageKind::Pause { duration_ms: 0 }),
                Stage::new("b", StageKind::Narrate { lines: Vec::new() }),
            ]),
            TimelineConfig::default(),
        )
        .unwrap();

        // Act
        let started = timeline.start(&mut caps);

        // Assert
        assert!(started);
        assert!(!timeline.is_running());
        assert_eq!(timeline.events().len(), 5);
        assert_eq!(scene.last_camera(), Some(CameraPose::default()));
    }
}
