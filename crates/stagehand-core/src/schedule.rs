//! Generation-aware timer queue.
//!
//! Replaces host timers: callers schedule a payload for an instant on the
//! frame-loop timeline and poll for due payloads on every tick. Entries stamped
//! with a stale generation are dropped when they come due instead of firing.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

use crate::generation::Generation;

/// Handle returned by [`Scheduler::schedule`], used to cancel one timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    due: Duration,
    seq: u64,
}

impl TimerId {
    /// The instant this timer fires at.
    #[must_use]
    pub fn due(&self) -> Duration {
        self.due
    }
}

#[derive(Debug)]
struct Entry<T> {
    generation: Generation,
    payload: T,
}

/// Ordered timer queue. Timers with equal due instants fire in scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: BTreeMap<TimerId, Entry<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to fire at `due` under `generation`.
    pub fn schedule(&mut self, due: Duration, generation: Generation, payload: T) -> TimerId {
        let id = TimerId {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(id, Entry {
            generation,
            payload,
        });
        id
    }

    /// Cancels a timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.entries.remove(&id).map(|entry| entry.payload)
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending timers, including stale ones not yet reaped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending due instant.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.keys().next().map(TimerId::due)
    }

    /// Removes and returns the earliest payload due at or before `now` whose
    /// generation is `current`. Stale entries met along the way are discarded.
    pub fn pop_due(&mut self, now: Duration, current: Generation) -> Option<T> {
        loop {
            let (&id, _) = self.entries.first_key_value()?;
            if id.due > now {
                return None;
            }
            let entry = self.entries.remove(&id)?;
            if entry.generation == current {
                return Some(entry.payload);
            }
            trace!(
                timer_generation = %entry.generation,
                current_generation = %current,
                "discarding stale timer"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_pop_due_respects_due_instant_and_order() {
        // Arrange
        let generation = Generation::INITIAL;
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(200), generation, "late");
        scheduler.schedule(ms(100), generation, "first");
        scheduler.schedule(ms(100), generation, "second");

        // Act / Assert
        assert_eq!(scheduler.pop_due(ms(50), generation), None);
        assert_eq!(scheduler.pop_due(ms(150), generation), Some("first"));
        assert_eq!(scheduler.pop_due(ms(150), generation), Some("second"));
        assert_eq!(scheduler.pop_due(ms(150), generation), None);
        assert_eq!(scheduler.pop_due(ms(200), generation), Some("late"));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_stale_generation_entries_never_fire() {
        // Arrange
        let mut counter = crate::generation::GenerationCounter::new();
        let old = counter.advance();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), old, "stale");
        let current = counter.advance();
        scheduler.schedule(ms(20), current, "fresh");

        // Act
        let fired = scheduler.pop_due(ms(30), current);

        // Assert
        assert_eq!(fired, Some("fresh"));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_removes_a_single_timer() {
        let generation = Generation::INITIAL;
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(ms(5), generation, 1);
        let drop = scheduler.schedule(ms(5), generation, 2);

        assert_eq!(scheduler.cancel(drop), Some(2));
        assert_eq!(scheduler.cancel(drop), None);
        assert_eq!(scheduler.next_due(), Some(keep.due()));
        assert_eq!(scheduler.pop_due(ms(5), generation), Some(1));
    }
}
