//! Frame loop that drives a timeline against the headless host.

use std::time::Duration;

use stagehand_content::application::compiler::compile;
use stagehand_content::application::loader::load_script;
use stagehand_content::domain::errors::ContentError;
use stagehand_core::event::SequencerEvent;
use stagehand_timeline::application::controller::StageTimeline;
use stagehand_timeline::domain::config::TimelineConfig;
use stagehand_timeline::domain::events::TimelineEventKind;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, instrument, warn};

use crate::autopilot::{Autopilot, LearnerAction};
use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::host::Host;

const AUTOPILOT_THINK_TIME: Duration = Duration::from_millis(600);

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The activity that ran.
    pub activity_id: String,
    /// The sequence that ran.
    pub sequence: String,
    /// True if the sequence completed.
    pub completed: bool,
    /// Frames driven.
    pub frames: u64,
    /// Timeline events observed.
    pub events: usize,
    /// Time since start.
    pub elapsed: Duration,
}

/// Owns a timeline, its host engines and the optional autopilot.
#[derive(Debug)]
pub struct Driver {
    timeline: StageTimeline,
    host: Host,
    autopilot: Option<Autopilot>,
    frames: u64,
    events: usize,
    completed: bool,
}

impl Driver {
    /// Wraps `timeline`. With `autopilot`, speech recognition is available and
    /// answered automatically; without it, speech stages degrade.
    #[must_use]
    pub fn new(timeline: StageTimeline, autopilot: bool) -> Self {
        Self {
            timeline,
            host: Host::new(autopilot),
            autopilot: autopilot.then(|| Autopilot::new(AUTOPILOT_THINK_TIME)),
            frames: 0,
            events: 0,
            completed: false,
        }
    }

    /// Starts the sequence.
    pub fn start(&mut self) -> bool {
        let started = self.timeline.start(&mut self.host.caps());
        self.drain_events();
        started
    }

    /// Stops the sequence.
    pub fn stop(&mut self) {
        self.timeline.stop(&mut self.host.caps());
        self.drain_events();
    }

    /// Drives one frame at `now`.
    pub fn frame(&mut self, now: Duration) {
        self.frames += 1;

        if let Some(ticket) = self.host.synthesizer.poll_finished(now) {
            self.timeline.utterance_finished(ticket, &mut self.host.caps());
        }

        let actions = match self.autopilot.as_mut() {
            Some(autopilot) => {
                autopilot.plan(&self.timeline, self.host.recognizer.listening().is_some(), now)
            }
            None => Vec::new(),
        };
        for action in actions {
            match action {
                LearnerAction::Pointer(input) => {
                    self.timeline.handle_pointer(input, &mut self.host.caps());
                }
                LearnerAction::Say(transcript) => {
                    if let Some(ticket) = self.host.recognizer.take_listening() {
                        info!(%transcript, "learner answered");
                        self.timeline
                            .transcript_received(ticket, &transcript, &mut self.host.caps());
                    }
                }
            }
        }

        self.timeline.tick(now, &mut self.host.caps());
        self.drain_events();
    }

    /// Returns true while the sequence is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    /// Returns true once the sequence has completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The driven timeline.
    #[must_use]
    pub fn timeline(&self) -> &StageTimeline {
        &self.timeline
    }

    /// The host engines.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Summarizes the run so far.
    #[must_use]
    pub fn summary(&self, elapsed: Duration) -> RunSummary {
        let definition = self.timeline.definition();
        RunSummary {
            activity_id: definition.id.to_string(),
            sequence: definition.sequence.clone(),
            completed: self.completed,
            frames: self.frames,
            events: self.events,
            elapsed,
        }
    }

    fn drain_events(&mut self) {
        for event in self.timeline.take_events() {
            self.events += 1;
            if matches!(event.kind, TimelineEventKind::SequenceCompleted(_)) {
                self.completed = true;
            }
            info!(
                event_type = event.event_type(),
                sequence_number = event.metadata().sequence_number,
                generation = %event.metadata().generation,
                payload = %event.to_payload(),
                "timeline event"
            );
        }
    }
}

/// Loads and compiles the configured script and builds a driver for it.
///
/// # Errors
///
/// Returns `RunnerError::Content` if the script cannot be loaded, the sequence
/// does not exist, or the definition is invalid.
pub fn prepare(config: &RunnerConfig) -> Result<Driver, RunnerError> {
    let script = load_script(&config.script)?;
    let definition = compile(&script, config.sequence.as_deref())?;

    let mut settings: TimelineConfig = script.settings.clone();
    settings.narration.enabled = config.voice_enabled;
    settings.narration.volume = config.voice_volume;

    let timeline = StageTimeline::new(definition, settings).map_err(ContentError::from)?;
    Ok(Driver::new(timeline, config.autopilot))
}

/// Runs the configured sequence until it completes, the runtime limit passes,
/// or the process is interrupted.
///
/// # Errors
///
/// Returns `RunnerError` if the run cannot be prepared.
#[instrument(skip(config), fields(script = %config.script.display()))]
pub async fn run(config: RunnerConfig) -> Result<RunSummary, RunnerError> {
    let mut driver = prepare(&config)?;

    let mut interval = tokio::time::interval(config.frame_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = Instant::now();
    driver.start();

    while driver.is_running() {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted; stopping sequence");
                driver.stop();
                break;
            }
        }

        let now = started.elapsed();
        driver.frame(now);
        if driver.is_running() && now >= config.max_runtime {
            warn!(max_runtime_s = config.max_runtime.as_secs(), "runtime limit reached; stopping sequence");
            driver.stop();
        }
    }

    let summary = driver.summary(started.elapsed());
    info!(
        activity_id = %summary.activity_id,
        sequence = %summary.sequence,
        completed = summary.completed,
        frames = summary.frames,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use stagehand_core::ids::TargetId;

    const FRAME: Duration = Duration::from_millis(16);

    fn config(sequence: &str, autopilot: bool) -> RunnerConfig {
        RunnerConfig {
            script: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/number-rods.yaml"),
            sequence: Some(sequence.to_owned()),
            frame_hz: 60,
            voice_enabled: true,
            voice_volume: 1.0,
            autopilot,
            max_runtime: Duration::from_secs(30),
        }
    }

    fn drive(driver: &mut Driver, limit: Duration) {
        let mut now = Duration::ZERO;
        while driver.is_running() && now < limit {
            now += FRAME;
            driver.frame(now);
        }
    }

    #[test]
    fn test_autopilot_completes_the_guided_sequence() {
        // Arrange
        let mut driver = prepare(&config("guided", true)).unwrap();

        // Act
        assert!(driver.start());
        drive(&mut driver, Duration::from_secs(120));

        // Assert
        assert!(driver.is_completed());
        let placement = driver.timeline().placement();
        assert!(placement.target(&TargetId::new("slot-one")).unwrap().is_occupied());
        assert!(placement.target(&TargetId::new("slot-two")).unwrap().is_occupied());
        assert_eq!(driver.timeline().recognition_attempts().len(), 1);
    }

    #[test]
    fn test_without_autopilot_the_placement_stage_waits() {
        // Arrange
        let mut driver = prepare(&config("quick", false)).unwrap();

        // Act
        driver.start();
        drive(&mut driver, Duration::from_secs(10));

        // Assert
        assert!(driver.is_running());
        assert!(!driver.is_completed());
        assert_eq!(
            driver.timeline().active_stage().map(|stage| stage.kind.name()),
            Some("await-placement")
        );
    }

    #[test]
    fn test_muted_voice_still_completes() {
        let mut settings = config("guided", true);
        settings.voice_enabled = false;
        let mut driver = prepare(&settings).unwrap();

        driver.start();
        drive(&mut driver, Duration::from_secs(120));

        assert!(driver.is_completed());
        assert!(!driver.host().synthesizer.is_speaking());
    }

    #[test]
    fn test_unknown_sequence_fails_to_prepare() {
        let result = prepare(&config("missing", true));

        assert!(matches!(
            result,
            Err(RunnerError::Content(ContentError::UnknownSequence { .. }))
        ));
    }

    #[tokio::test]
    async fn test_run_completes_the_quick_sequence() {
        // Arrange
        let mut settings = config("quick", true);
        settings.frame_hz = 120;

        // Act
        let summary = run(settings).await.unwrap();

        // Assert
        assert!(summary.completed);
        assert_eq!(summary.sequence, "quick");
        assert!(summary.frames > 0);
    }
}
