//! Generation token.
//!
//! Every `start()`/`reset()` opens a new generation. Anything scheduled for
//! later (timers, engine tickets, tweens) is stamped with the generation that
//! was current when it was scheduled, and is discarded if that generation is
//! no longer current when it comes due.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An epoch value. Comparable only for equality with the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any run has started.
    pub const INITIAL: Self = Self(0);

    /// Returns the raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Owner of the current generation. One per controller instance.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    /// Creates a counter at [`Generation::INITIAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current generation.
    #[must_use]
    pub fn current(&self) -> Generation {
        self.current
    }

    /// Invalidates everything stamped with the current generation and returns
    /// the new one.
    pub fn advance(&mut self) -> Generation {
        self.current = Generation(self.current.0.wrapping_add(1));
        self.current
    }

    /// Returns true when `stamp` is the current generation.
    #[must_use]
    pub fn is_current(&self, stamp: Generation) -> bool {
        self.current == stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_invalidates_previous_stamp() {
        // Arrange
        let mut counter = GenerationCounter::new();
        let first = counter.advance();

        // Act
        let second = counter.advance();

        // Assert
        assert_ne!(first, second);
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn test_initial_generation_is_zero() {
        let counter = GenerationCounter::new();

        assert_eq!(counter.current(), Generation::INITIAL);
        assert_eq!(counter.current().value(), 0);
        assert_eq!(counter.current().to_string(), "g0");
    }
}
