//! Time-based camera interpolation.

use std::collections::VecDeque;
use std::time::Duration;

use stagehand_core::generation::Generation;
use stagehand_core::geometry::CameraPose;
use stagehand_core::tween::Tween;
use tracing::debug;

use crate::domain::events::CameraEvent;
use crate::domain::waypoint::Waypoint;

/// Drives the camera pose through queued legs.
///
/// A leg that finishes hands its end instant to the next leg as that leg's
/// start, so sparse sampling never stretches or shrinks the path.
#[derive(Debug)]
pub struct CameraChoreographer {
    pose: CameraPose,
    active: Option<Tween<CameraPose>>,
    queued: VecDeque<Waypoint>,
    generation: Generation,
}

impl CameraChoreographer {
    /// Creates an idle choreographer at `pose`.
    #[must_use]
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            active: None,
            queued: VecDeque::new(),
            generation: Generation::INITIAL,
        }
    }

    /// The last sampled pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Returns true while a leg is in progress.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    /// Places the camera without animating and drops any queued legs.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.cancel_all();
        self.pose = pose;
    }

    /// Replaces any motion with a single leg starting at `now`.
    pub fn move_to(&mut self, waypoint: Waypoint, generation: Generation, now: Duration) {
        // A single-element list is never empty, so `follow` cannot settle here.
        let _ = self.follow(vec![waypoint], generation, now);
    }

    /// Replaces any motion with `waypoints`, played in order from `now`.
    ///
    /// An empty list settles immediately and the event is returned here
    /// rather than from a later `tick`.
    pub fn follow(
        &mut self,
        waypoints: Vec<Waypoint>,
        generation: Generation,
        now: Duration,
    ) -> Option<CameraEvent> {
        self.cancel_all();
        self.generation = generation;
        self.queued = waypoints.into();

        let Some(first) = self.queued.pop_front() else {
            return Some(CameraEvent::Settled { generation });
        };
        debug!(%generation, legs = self.queued.len() + 1, "camera move started");
        self.active = Some(self.leg(self.pose, &first, now));
        None
    }

    /// Samples the active leg at `now`.
    ///
    /// Returns `Settled` once, on the sample where the final leg completes.
    pub fn tick(&mut self, now: Duration) -> Option<CameraEvent> {
        loop {
            let tween = self.active.as_ref()?;
            if !tween.is_finished(now) {
                self.pose = tween.sample(now);
                return None;
            }

            self.pose = *tween.target();
            let end = tween.end();
            match self.queued.pop_front() {
                Some(next) => self.active = Some(self.leg(self.pose, &next, end)),
                None => {
                    self.active = None;
                    debug!(generation = %self.generation, "camera settled");
                    return Some(CameraEvent::Settled {
                        generation: self.generation,
                    });
                }
            }
        }
    }

    /// Stops all motion, freezing the pose at its last sampled value.
    pub fn cancel_all(&mut self) {
        self.active = None;
        self.queued.clear();
    }

    fn leg(&self, from: CameraPose, to: &Waypoint, start: Duration) -> Tween<CameraPose> {
        Tween::new(from, to.pose(), start, to.duration(), to.easing)
    }
}
