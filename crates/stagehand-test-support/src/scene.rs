//! Scene sink that records every position update.

use stagehand_core::capability::SceneSink;
use stagehand_core::geometry::{CameraPose, Vector2};
use stagehand_core::ids::ObjectId;

/// Records camera and object updates issued by the sequencer.
#[derive(Debug, Default)]
pub struct RecordingScene {
    cameras: Vec<CameraPose>,
    objects: Vec<(ObjectId, Vector2)>,
}

impl RecordingScene {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every camera pose issued, in order.
    #[must_use]
    pub fn camera_updates(&self) -> &[CameraPose] {
        &self.cameras
    }

    /// The most recent camera pose.
    #[must_use]
    pub fn last_camera(&self) -> Option<CameraPose> {
        self.cameras.last().copied()
    }

    /// Every object update issued, in order.
    #[must_use]
    pub fn object_updates(&self) -> &[(ObjectId, Vector2)] {
        &self.objects
    }

    /// The most recent position issued for `object`.
    #[must_use]
    pub fn last_position(&self, object: &ObjectId) -> Option<Vector2> {
        self.objects
            .iter()
            .rev()
            .find(|(id, _)| id == object)
            .map(|(_, position)| *position)
    }
}

impl SceneSink for RecordingScene {
    fn set_camera(&mut self, pose: &CameraPose) {
        self.cameras.push(*pose);
    }

    fn set_object_position(&mut self, object: &ObjectId, position: Vector2) {
        self.objects.push((object.clone(), position));
    }
}
