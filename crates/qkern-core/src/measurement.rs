//! Measurement outcomes and shot tallies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of measuring a qubit in the computational basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Collapsed to `|0⟩`.
    Zero,
    /// Collapsed to `|1⟩`.
    One,
}

impl Outcome {
    /// The classical bit value.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.bit()
    }
}

/// Frequency table over the two measurement outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Number of `0` outcomes.
    pub zero: u64,
    /// Number of `1` outcomes.
    pub one: u64,
}

impl Counts {
    /// Empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome.
    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Zero => self.zero += 1,
            Outcome::One => self.one += 1,
        }
    }

    /// Count for a single outcome.
    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Zero => self.zero,
            Outcome::One => self.one,
        }
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> u64 {
        self.zero + self.one
    }

    /// Relative frequency of an outcome, `0.0` for an empty tally.
    pub fn frequency(&self, outcome: Outcome) -> f64 {
        let shots = self.shots();
        if shots == 0 {
            return 0.0;
        }
        self.get(outcome) as f64 / shots as f64
    }

    /// Combine two tallies. Counting is commutative, so shot order is irrelevant.
    #[must_use]
    pub fn merge(self, other: Counts) -> Counts {
        Counts {
            zero: self.zero + other.zero,
            one: self.one + other.one,
        }
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{0: {}, 1: {}}}", self.zero, self.one)
    }
}
