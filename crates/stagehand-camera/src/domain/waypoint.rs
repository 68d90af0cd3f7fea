//! Camera waypoints.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stagehand_core::easing::Easing;
use stagehand_core::geometry::{CameraPose, Vector3};

/// A pose to travel to, and how to get there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Eye position at the end of the leg.
    pub position: Vector3,
    /// Look-at target at the end of the leg.
    pub look_at: Vector3,
    /// Leg duration in milliseconds; zero snaps on the next sample.
    #[serde(default)]
    pub duration_ms: u64,
    /// Progress remapping for the leg.
    #[serde(default)]
    pub easing: Easing,
}

impl Waypoint {
    /// Creates a waypoint.
    #[must_use]
    pub fn new(position: Vector3, look_at: Vector3, duration_ms: u64, easing: Easing) -> Self {
        Self {
            position,
            look_at,
            duration_ms,
            easing,
        }
    }

    /// A leg that reuses `template`'s timing but ends at `pose`.
    #[must_use]
    pub fn toward(pose: CameraPose, template: &Waypoint) -> Self {
        Self {
            position: pose.position,
            look_at: pose.look_at,
            duration_ms: template.duration_ms,
            easing: template.easing,
        }
    }

    /// The pose at the end of the leg.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.look_at)
    }

    /// The leg duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Returns true when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_waypoint_defaults_to_linear_snap() {
        let yaml = "position: { x: 0.0, y: 4.0, z: 8.0 }\nlook_at: { x: 0.0, y: 0.0, z: 0.0 }\n";

        let waypoint: Waypoint = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(waypoint.duration_ms, 0);
        assert_eq!(waypoint.easing, Easing::Linear);
        assert_eq!(waypoint.pose().position, Vector3::new(0.0, 4.0, 8.0));
    }

    #[test]
    fn test_yaml_waypoint_reads_easing_name() {
        let yaml = "position: { x: 1.0, y: 2.0, z: 3.0 }\nlook_at: { x: 0.0, y: 0.0, z: 0.0 }\nduration_ms: 1200\neasing: ease-in-out-cubic\n";

        let waypoint: Waypoint = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(waypoint.duration(), Duration::from_millis(1_200));
        assert_eq!(waypoint.easing, Easing::EaseInOutCubic);
    }

    #[test]
    fn test_toward_copies_timing_from_template() {
        let template = Waypoint::new(
            Vector3::new(5.0, 5.0, 5.0),
            Vector3::default(),
            700,
            Easing::EaseOutQuad,
        );
        let home = CameraPose::new(Vector3::new(0.0, 1.0, 2.0), Vector3::default());

        let back = Waypoint::toward(home, &template);

        assert_eq!(back.pose(), home);
        assert_eq!(back.duration_ms, 700);
        assert_eq!(back.easing, Easing::EaseOutQuad);
    }
}
