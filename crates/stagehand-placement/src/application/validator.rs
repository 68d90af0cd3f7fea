//! The placement validator and its object arena.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::time::Duration;

use stagehand_core::easing::Easing;
use stagehand_core::error::ConfigError;
use stagehand_core::generation::Generation;
use stagehand_core::geometry::Vector2;
use stagehand_core::ids::{ObjectId, TargetId};
use stagehand_core::tween::Tween;
use tracing::{debug, info};

use crate::domain::classify::{Classification, MissReason, classify};
use crate::domain::errors::PlacementError;
use crate::domain::events::{DropOutcome, PlacementEvent};
use crate::domain::motion::MotionLeg;
use crate::domain::target::{DraggableObject, PlacementTarget};

/// Default duration of the return-home animation after a miss.
pub const DEFAULT_RETURN_HOME: Duration = Duration::from_millis(280);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MotionPurpose {
    ReturnHome,
    Scripted(Generation),
}

#[derive(Debug)]
struct ObjectMotion {
    tween: Tween<Vector2>,
    queued: VecDeque<MotionLeg>,
    purpose: MotionPurpose,
}

#[derive(Debug)]
struct ObjectSlot {
    object: DraggableObject,
    dragging: bool,
    motion: Option<ObjectMotion>,
}

#[derive(Debug, Clone)]
struct Arming {
    targets: Vec<TargetId>,
    expected_object: Option<ObjectId>,
    generation: Generation,
}

/// Validates drops and owns every draggable object of an activity.
///
/// Object positions are written only here: by drags, snaps, the return-home
/// animation and scripted motion. Each write is buffered as
/// [`PlacementEvent::ObjectMoved`] for the host's scene.
#[derive(Debug)]
pub struct PlacementValidator {
    targets: Vec<PlacementTarget>,
    objects: BTreeMap<ObjectId, ObjectSlot>,
    armed: Option<Arming>,
    return_home: Duration,
    events: Vec<PlacementEvent>,
}

impl PlacementValidator {
    /// Builds the arena from authored targets and objects.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for duplicate ids, a non-positive or non-finite
    /// tolerance, or a non-finite position.
    pub fn new(
        targets: Vec<PlacementTarget>,
        objects: Vec<DraggableObject>,
        return_home: Duration,
    ) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for target in &targets {
            if !seen.insert(target.id.clone()) {
                return Err(ConfigError::DuplicateId {
                    kind: "target",
                    id: target.id.to_string(),
                });
            }
            if !target.tolerance_radius.is_finite() || target.tolerance_radius <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("targets.{}.tolerance_radius", target.id),
                    reason: "must be a positive finite number".to_owned(),
                });
            }
            if !target.center.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: format!("targets.{}.center", target.id),
                    reason: "must be finite".to_owned(),
                });
            }
        }

        let mut arena = BTreeMap::new();
        for mut object in objects {
            if !object.home_position.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: format!("objects.{}.home", object.id),
                    reason: "must be finite".to_owned(),
                });
            }
            if arena.contains_key(&object.id) {
                return Err(ConfigError::DuplicateId {
                    kind: "object",
                    id: object.id.to_string(),
                });
            }
            object.reset();
            arena.insert(
                object.id.clone(),
                ObjectSlot {
                    object,
                    dragging: false,
                    motion: None,
                },
            );
        }

        let mut targets = targets;
        for target in &mut targets {
            target.occupant = None;
        }

        Ok(Self {
            targets,
            objects: arena,
            armed: None,
            return_home,
            events: Vec::new(),
        })
    }

    /// Targets in authored order.
    #[must_use]
    pub fn targets(&self) -> &[PlacementTarget] {
        &self.targets
    }

    /// Looks up a target.
    #[must_use]
    pub fn target(&self, id: &TargetId) -> Option<&PlacementTarget> {
        self.targets.iter().find(|target| &target.id == id)
    }

    /// Looks up an object.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&DraggableObject> {
        self.objects.get(id).map(|slot| &slot.object)
    }

    /// Every object, ordered by id.
    pub fn objects(&self) -> impl Iterator<Item = &DraggableObject> {
        self.objects.values().map(|slot| &slot.object)
    }

    /// Returns true while a placement stage has armed the validator.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns true while any object is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.objects.values().any(|slot| slot.motion.is_some())
    }

    /// Pending signals, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PlacementEvent] {
        &self.events
    }

    /// Drains pending signals.
    pub fn take_events(&mut self) -> Vec<PlacementEvent> {
        std::mem::take(&mut self.events)
    }

    /// Accepts drops on `targets` (in this order for tie-breaking), optionally
    /// only of `expected_object`.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError` if a target or the expected object is unknown.
    pub fn arm(
        &mut self,
        targets: &[TargetId],
        expected_object: Option<ObjectId>,
        generation: Generation,
    ) -> Result<(), PlacementError> {
        if let Some(missing) = targets.iter().find(|id| self.target(id).is_none()) {
            return Err(PlacementError::UnknownTarget(missing.clone()));
        }
        if let Some(object) = expected_object
            .as_ref()
            .filter(|object| !self.objects.contains_key(*object))
        {
            return Err(PlacementError::UnknownObject(object.clone()));
        }
        debug!(%generation, targets = targets.len(), "placement armed");
        self.armed = Some(Arming {
            targets: targets.to_vec(),
            expected_object,
            generation,
        });
        Ok(())
    }

    /// Stops accepting drops. Objects and occupants are untouched.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Starts dragging `object` from `point`.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError` if the object is unknown, locked by a scripted
    /// motion or already seated in a target.
    pub fn begin_drag(&mut self, object: &ObjectId, point: Vector2) -> Result<(), PlacementError> {
        let seated = self.is_seated(object);
        let slot = self
            .objects
            .get_mut(object)
            .ok_or_else(|| PlacementError::UnknownObject(object.clone()))?;
        if slot.object.locked {
            return Err(PlacementError::ObjectLocked(object.clone()));
        }
        if seated {
            return Err(PlacementError::ObjectSeated(object.clone()));
        }
        slot.dragging = true;
        slot.motion = None;
        slot.object.current_position = point;
        self.events.push(PlacementEvent::ObjectMoved {
            object: object.clone(),
            position: point,
        });
        Ok(())
    }

    /// Moves a dragged object to `point`.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError` if the object is unknown or not being dragged.
    pub fn drag_to(&mut self, object: &ObjectId, point: Vector2) -> Result<(), PlacementError> {
        let slot = self
            .objects
            .get_mut(object)
            .ok_or_else(|| PlacementError::UnknownObject(object.clone()))?;
        if !slot.dragging {
            return Err(PlacementError::NotDragging(object.clone()));
        }
        slot.object.current_position = point;
        self.events.push(PlacementEvent::ObjectMoved {
            object: object.clone(),
            position: point,
        });
        Ok(())
    }

    /// Abandons a drag without validating it; the object returns home.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError` if the object is unknown or not being dragged.
    pub fn cancel_drag(&mut self, object: &ObjectId, now: Duration) -> Result<(), PlacementError> {
        let slot = self
            .objects
            .get_mut(object)
            .ok_or_else(|| PlacementError::UnknownObject(object.clone()))?;
        if !slot.dragging {
            return Err(PlacementError::NotDragging(object.clone()));
        }
        slot.dragging = false;
        self.send_home(object, now);
        Ok(())
    }

    /// Releases `object` at `release` and classifies the drop.
    ///
    /// A hit seats the object and snaps it to the target centre. Any miss sends
    /// it home over the return-home duration, except for a locked object,
    /// which stays under its scripted motion.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError` if the object is unknown or already seated.
    pub fn drop_object(
        &mut self,
        object: &ObjectId,
        release: Vector2,
        now: Duration,
    ) -> Result<DropOutcome, PlacementError> {
        let seated = self.is_seated(object);
        let slot = self
            .objects
            .get_mut(object)
            .ok_or_else(|| PlacementError::UnknownObject(object.clone()))?;
        if seated {
            return Err(PlacementError::ObjectSeated(object.clone()));
        }
        if slot.object.locked {
            debug!(object_id = %object, "drop ignored: object locked");
            return Ok(DropOutcome::Miss {
                object: object.clone(),
                reason: MissReason::ObjectLocked,
                release,
            });
        }
        slot.dragging = false;
        slot.motion = None;
        if release.is_finite() {
            slot.object.current_position = release;
        }

        let classification = match &self.armed {
            None => Classification::Miss(MissReason::NotArmed),
            Some(arming)
                if arming
                    .expected_object
                    .as_ref()
                    .is_some_and(|expected| expected != object) =>
            {
                Classification::Miss(MissReason::WrongObject)
            }
            Some(arming) => classify(
                release,
                arming
                    .targets
                    .iter()
                    .filter_map(|id| self.targets.iter().find(|target| &target.id == id)),
            ),
        };

        match classification {
            Classification::Hit {
                target,
                center,
                distance,
            } => {
                if let Some(seat) = self.targets.iter_mut().find(|t| t.id == target) {
                    seat.occupant = Some(object.clone());
                }
                if let Some(slot) = self.objects.get_mut(object) {
                    slot.object.current_position = center;
                }
                self.events.push(PlacementEvent::ObjectMoved {
                    object: object.clone(),
                    position: center,
                });
                info!(object_id = %object, target_id = %target, distance, "placement hit");
                Ok(DropOutcome::Hit {
                    object: object.clone(),
                    target,
                    position: center,
                })
            }
            Classification::Miss(reason) => {
                info!(object_id = %object, reason = reason.as_str(), "placement miss");
                self.send_home(object, now);
                Ok(DropOutcome::Miss {
                    object: object.clone(),
                    reason,
                    release,
                })
            }
        }
    }

    /// Plays `legs` on `object`, locking it until the last leg ends.
    ///
    /// Any drag or return-home animation on the object is cancelled. An empty
    /// leg list settles at once.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError` if the object is unknown or seated.
    pub fn script_motion(
        &mut self,
        object: &ObjectId,
        legs: Vec<MotionLeg>,
        generation: Generation,
        now: Duration,
    ) -> Result<(), PlacementError> {
        let seated = self.is_seated(object);
        let slot = self
            .objects
            .get_mut(object)
            .ok_or_else(|| PlacementError::UnknownObject(object.clone()))?;
        if seated {
            return Err(PlacementError::ObjectSeated(object.clone()));
        }
        slot.dragging = false;
        slot.motion = None;

        let mut queued: VecDeque<MotionLeg> = legs.into();
        let Some(first) = queued.pop_front() else {
            slot.object.locked = false;
            self.events.push(PlacementEvent::MotionSettled {
                object: object.clone(),
                generation,
            });
            return Ok(());
        };

        debug!(object_id = %object, %generation, legs = queued.len() + 1, "scripted motion started");
        slot.object.locked = true;
        slot.motion = Some(ObjectMotion {
            tween: leg_tween(slot.object.current_position, &first, now),
            queued,
            purpose: MotionPurpose::Scripted(generation),
        });
        Ok(())
    }

    /// Samples every object animation at `now`.
    pub fn tick(&mut self, now: Duration) {
        for (id, slot) in &mut self.objects {
            let Some(motion) = slot.motion.as_mut() else {
                continue;
            };

            let mut finished = false;
            loop {
                if !motion.tween.is_finished(now) {
                    slot.object.current_position = motion.tween.sample(now);
                    break;
                }
                slot.object.current_position = *motion.tween.target();
                let end = motion.tween.end();
                match motion.queued.pop_front() {
                    Some(next) => {
                        motion.tween = leg_tween(slot.object.current_position, &next, end);
                    }
                    None => {
                        finished = true;
                        break;
                    }
                }
            }

            self.events.push(PlacementEvent::ObjectMoved {
                object: id.clone(),
                position: slot.object.current_position,
            });
            if finished {
                let purpose = motion.purpose;
                slot.motion = None;
                if let MotionPurpose::Scripted(generation) = purpose {
                    slot.object.locked = false;
                    debug!(object_id = %id, %generation, "scripted motion settled");
                    self.events.push(PlacementEvent::MotionSettled {
                        object: id.clone(),
                        generation,
                    });
                }
            }
        }
    }

    /// Clears occupants, puts every object home and unlocked, cancels drags
    /// and animations, and disarms.
    pub fn reset(&mut self) {
        self.armed = None;
        for target in &mut self.targets {
            target.occupant = None;
        }
        for (id, slot) in &mut self.objects {
            slot.dragging = false;
            slot.motion = None;
            slot.object.reset();
            self.events.push(PlacementEvent::ObjectMoved {
                object: id.clone(),
                position: slot.object.home_position,
            });
        }
    }

    /// The target holding `object`, if it is seated.
    #[must_use]
    pub fn seat_of(&self, object: &ObjectId) -> Option<&TargetId> {
        self.targets
            .iter()
            .find(|target| target.occupant.as_ref() == Some(object))
            .map(|target| &target.id)
    }

    /// Generation of the current arming.
    #[must_use]
    pub fn armed_generation(&self) -> Option<Generation> {
        self.armed.as_ref().map(|arming| arming.generation)
    }

    fn is_seated(&self, object: &ObjectId) -> bool {
        self.seat_of(object).is_some()
    }

    fn send_home(&mut self, object: &ObjectId, now: Duration) {
        let Some(slot) = self.objects.get_mut(object) else {
            return;
        };
        let leg = MotionLeg::new(
            slot.object.home_position,
            u64::try_from(self.return_home.as_millis()).unwrap_or(u64::MAX),
            Easing::EaseOutCubic,
        );
        slot.motion = Some(ObjectMotion {
            tween: leg_tween(slot.object.current_position, &leg, now),
            queued: VecDeque::new(),
            purpose: MotionPurpose::ReturnHome,
        });
    }
}

fn leg_tween(from: Vector2, leg: &MotionLeg, start: Duration) -> Tween<Vector2> {
    Tween::new(from, leg.to, start, leg.duration(), leg.easing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::generation::GenerationCounter;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn rod() -> ObjectId {
        ObjectId::new("rod")
    }

    fn validator() -> PlacementValidator {
        PlacementValidator::new(
            vec![
                PlacementTarget::new("slot-a", Vector2::new(0.0, 0.0), 1.0),
                PlacementTarget::new("slot-b", Vector2::new(5.0, 0.0), 1.0),
            ],
            vec![
                DraggableObject::new("rod", Vector2::new(10.0, 10.0)),
                DraggableObject::new("cube", Vector2::new(-10.0, 10.0)),
            ],
            DEFAULT_RETURN_HOME,
        )
        .unwrap()
    }

    fn armed_validator() -> (PlacementValidator, Generation) {
        let generation = GenerationCounter::new().advance();
        let mut validator = validator();
        validator
            .arm(
                &[TargetId::new("slot-a"), TargetId::new("slot-b")],
                None,
                generation,
            )
            .unwrap();
        (validator, generation)
    }

    #[test]
    fn test_duplicate_target_ids_are_rejected() {
        let result = PlacementValidator::new(
            vec![
                PlacementTarget::new("slot", Vector2::default(), 1.0),
                PlacementTarget::new("slot", Vector2::new(1.0, 0.0), 1.0),
            ],
            Vec::new(),
            DEFAULT_RETURN_HOME,
        );

        assert!(matches!(
            result,
            Err(ConfigError::DuplicateId { kind: "target", .. })
        ));
    }

    #[test]
    fn test_zero_tolerance_is_rejected() {
        let result = PlacementValidator::new(
            vec![PlacementTarget::new("slot", Vector2::default(), 0.0)],
            Vec::new(),
            DEFAULT_RETURN_HOME,
        );

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_hit_seats_object_and_snaps_to_centre() {
        // Arrange
        let (mut validator, _) = armed_validator();
        validator.begin_drag(&rod(), Vector2::new(10.0, 10.0)).unwrap();
        validator.drag_to(&rod(), Vector2::new(0.5, 0.5)).unwrap();
        validator.take_events();

        // Act
        let outcome = validator
            .drop_object(&rod(), Vector2::new(0.5, 0.5), ms(100))
            .unwrap();

        // Assert
        assert_eq!(
            outcome,
            DropOutcome::Hit {
                object: rod(),
                target: TargetId::new("slot-a"),
                position: Vector2::new(0.0, 0.0),
            }
        );
        assert_eq!(
            validator.target(&TargetId::new("slot-a")).unwrap().occupant,
            Some(rod())
        );
        assert_eq!(
            validator.object(&rod()).unwrap().current_position,
            Vector2::new(0.0, 0.0)
        );
        assert_eq!(
            validator.take_events(),
            vec![PlacementEvent::ObjectMoved {
                object: rod(),
                position: Vector2::new(0.0, 0.0),
            }]
        );
    }

    #[test]
    fn test_miss_returns_home_over_return_duration() {
        // Arrange
        let (mut validator, _) = armed_validator();
        validator.begin_drag(&rod(), Vector2::new(10.0, 10.0)).unwrap();

        // Act
        let outcome = validator
            .drop_object(&rod(), Vector2::new(2.5, 0.0), ms(1_000))
            .unwrap();
        validator.tick(ms(1_140));
        let midway = validator.object(&rod()).unwrap().current_position;
        validator.tick(ms(1_280));

        // Assert
        assert!(matches!(
            outcome,
            DropOutcome::Miss { reason: MissReason::OutOfTolerance, .. }
        ));
        assert_ne!(midway, Vector2::new(2.5, 0.0));
        assert_ne!(midway, Vector2::new(10.0, 10.0));
        assert_eq!(
            validator.object(&rod()).unwrap().current_position,
            Vector2::new(10.0, 10.0)
        );
        assert!(!validator.is_animating());
        assert!(validator.targets().iter().all(|t| t.occupant.is_none()));
    }

    #[test]
    fn test_second_object_on_occupied_target_reports_occupied() {
        // Arrange
        let (mut validator, _) = armed_validator();
        validator
            .drop_object(&rod(), Vector2::new(0.0, 0.0), ms(0))
            .unwrap();

        // Act
        let outcome = validator
            .drop_object(&ObjectId::new("cube"), Vector2::new(0.1, 0.0), ms(10))
            .unwrap();

        // Assert
        assert!(matches!(
            outcome,
            DropOutcome::Miss { reason: MissReason::TargetOccupied, .. }
        ));
        assert_eq!(
            validator.target(&TargetId::new("slot-a")).unwrap().occupant,
            Some(rod())
        );
    }

    #[test]
    fn test_seated_object_cannot_be_dragged_again() {
        let (mut validator, _) = armed_validator();
        validator
            .drop_object(&rod(), Vector2::new(5.0, 0.0), ms(0))
            .unwrap();

        let result = validator.begin_drag(&rod(), Vector2::new(5.0, 0.0));

        assert_eq!(result, Err(PlacementError::ObjectSeated(rod())));
        assert_eq!(validator.seat_of(&rod()), Some(&TargetId::new("slot-b")));
    }

    #[test]
    fn test_unarmed_drop_misses_with_not_armed() {
        let mut validator = validator();

        let outcome = validator
            .drop_object(&rod(), Vector2::new(0.0, 0.0), ms(0))
            .unwrap();

        assert!(matches!(
            outcome,
            DropOutcome::Miss { reason: MissReason::NotArmed, .. }
        ));
    }

    #[test]
    fn test_wrong_object_misses_even_inside_target() {
        let generation = GenerationCounter::new().advance();
        let mut validator = validator();
        validator
            .arm(&[TargetId::new("slot-a")], Some(rod()), generation)
            .unwrap();

        let outcome = validator
            .drop_object(&ObjectId::new("cube"), Vector2::new(0.0, 0.0), ms(0))
            .unwrap();

        assert!(matches!(
            outcome,
            DropOutcome::Miss { reason: MissReason::WrongObject, .. }
        ));
    }

    #[test]
    fn test_only_armed_targets_are_candidates() {
        let generation = GenerationCounter::new().advance();
        let mut validator = validator();
        validator
            .arm(&[TargetId::new("slot-b")], None, generation)
            .unwrap();

        let outcome = validator
            .drop_object(&rod(), Vector2::new(0.0, 0.0), ms(0))
            .unwrap();

        assert!(!outcome.is_hit());
    }

    #[test]
    fn test_scripted_motion_locks_object_until_settled() {
        // Arrange
        let (mut validator, generation) = armed_validator();
        validator
            .script_motion(
                &rod(),
                vec![
                    MotionLeg::new(Vector2::new(0.0, 0.0), 400, Easing::EaseOutCubic),
                    MotionLeg::new(Vector2::new(10.0, 10.0), 400, Easing::EaseOutCubic),
                ],
                generation,
                ms(0),
            )
            .unwrap();

        // Act
        let drag = validator.begin_drag(&rod(), Vector2::new(1.0, 1.0));
        validator.tick(ms(400));
        let at_target = validator.object(&rod()).unwrap().current_position;
        validator.take_events();
        validator.tick(ms(800));

        // Assert
        assert_eq!(drag, Err(PlacementError::ObjectLocked(rod())));
        assert_eq!(at_target, Vector2::new(0.0, 0.0));
        assert!(!validator.object(&rod()).unwrap().locked);
        assert!(validator.take_events().contains(&PlacementEvent::MotionSettled {
            object: rod(),
            generation,
        }));
        assert!(validator.targets().iter().all(|t| t.occupant.is_none()));
    }

    #[test]
    fn test_drop_on_locked_object_is_reported_and_ignored() {
        let (mut validator, generation) = armed_validator();
        validator
            .script_motion(
                &rod(),
                vec![MotionLeg::new(Vector2::new(0.0, 0.0), 400, Easing::Linear)],
                generation,
                ms(0),
            )
            .unwrap();

        let outcome = validator
            .drop_object(&rod(), Vector2::new(0.0, 0.0), ms(10))
            .unwrap();

        assert!(matches!(
            outcome,
            DropOutcome::Miss { reason: MissReason::ObjectLocked, .. }
        ));
        assert!(validator.object(&rod()).unwrap().locked);
        assert!(validator.targets().iter().all(|t| t.occupant.is_none()));
    }

    #[test]
    fn test_reset_clears_occupants_and_returns_objects_home() {
        // Arrange
        let (mut validator, generation) = armed_validator();
        validator
            .drop_object(&rod(), Vector2::new(0.0, 0.0), ms(0))
            .unwrap();
        validator
            .script_motion(
                &ObjectId::new("cube"),
                vec![MotionLeg::new(Vector2::new(5.0, 0.0), 400, Easing::Linear)],
                generation,
                ms(0),
            )
            .unwrap();
        validator.tick(ms(200));

        // Act
        validator.reset();
        validator.tick(ms(1_000));

        // Assert
        assert!(!validator.is_armed());
        assert!(validator.targets().iter().all(|t| t.occupant.is_none()));
        for object in validator.objects() {
            assert_eq!(object.current_position, object.home_position);
            assert!(!object.locked);
        }
        assert!(
            !validator
                .take_events()
                .iter()
                .any(|e| matches!(e, PlacementEvent::MotionSettled { .. }))
        );
    }

    #[test]
    fn test_cancel_drag_sends_object_home_without_classifying() {
        let (mut validator, _) = armed_validator();
        validator.begin_drag(&rod(), Vector2::new(0.0, 0.0)).unwrap();

        validator.cancel_drag(&rod(), ms(0)).unwrap();
        validator.tick(ms(280));

        assert_eq!(
            validator.object(&rod()).unwrap().current_position,
            Vector2::new(10.0, 10.0)
        );
        assert!(validator.targets().iter().all(|t| t.occupant.is_none()));
    }

    #[test]
    fn test_begin_drag_interrupts_return_home() {
        let (mut validator, _) = armed_validator();
        validator
            .drop_object(&rod(), Vector2::new(3.0, 3.0), ms(0))
            .unwrap();

        validator.begin_drag(&rod(), Vector2::new(4.0, 4.0)).unwrap();
        validator.tick(ms(500));

        assert_eq!(
            validator.object(&rod()).unwrap().current_position,
            Vector2::new(4.0, 4.0)
        );
    }
}
