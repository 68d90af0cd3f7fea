//! Shared test fakes and utilities for the Stagehand sequencer.

mod clock;
mod recognizer;
mod scene;
mod synthesizer;

pub use clock::{FixedClock, fixed_clock};
pub use recognizer::FakeRecognizer;
pub use scene::RecordingScene;
pub use synthesizer::{FakeSynthesizer, SynthCall};
