//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Seed used for the random part of the test-state battery.
pub const DEFAULT_SEED: u64 = 0x5EED_0B17;

/// Minimum number of random states mixed into the test battery.
pub const MIN_RANDOM_TEST_STATES: usize = 2;

/// Tolerances and test-state settings used by circuit analysis.
///
/// Every [`Circuit`](crate::Circuit) carries one; derived circuits
/// (optimized, composed, inverted, repeated) inherit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Normalization tolerance applied by [`Circuit::is_unitary`](crate::Circuit::is_unitary).
    pub state_tolerance: f64,
    /// Allowed distance from `1.0` for two circuits to count as equivalent.
    pub fidelity_tolerance: f64,
    /// Number of random states added to `|0⟩, |1⟩, |+⟩`.
    pub random_test_states: usize,
    /// Seed for drawing the random test states.
    pub seed: u64,
}

impl AnalysisConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normalization tolerance.
    #[must_use]
    pub fn with_state_tolerance(mut self, tolerance: f64) -> Self {
        self.state_tolerance = tolerance;
        self
    }

    /// Set the equivalence tolerance.
    #[must_use]
    pub fn with_fidelity_tolerance(mut self, tolerance: f64) -> Self {
        self.fidelity_tolerance = tolerance;
        self
    }

    /// Set the number of random test states (at least [`MIN_RANDOM_TEST_STATES`]).
    #[must_use]
    pub fn with_random_test_states(mut self, count: usize) -> Self {
        self.random_test_states = count.max(MIN_RANDOM_TEST_STATES);
        self
    }

    /// Set the seed for the random test states.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Effective number of random test states.
    pub fn random_test_state_count(&self) -> usize {
        self.random_test_states.max(MIN_RANDOM_TEST_STATES)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            state_tolerance: qkern_core::NORMALIZATION_TOLERANCE,
            fidelity_tolerance: 1e-9,
            random_test_states: MIN_RANDOM_TEST_STATES,
            seed: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::new();
        assert_eq!(config.state_tolerance, 1e-10);
        assert_eq!(config.random_test_states, 2);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_random_state_count_is_clamped() {
        let config = AnalysisConfig::new().with_random_test_states(0);
        assert_eq!(config.random_test_states, MIN_RANDOM_TEST_STATES);

        // Deserialized values bypass the builder but not the accessor.
        let config: AnalysisConfig = serde_json::from_str(r#"{"random_test_states": 1}"#).unwrap();
        assert_eq!(config.random_test_state_count(), MIN_RANDOM_TEST_STATES);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::new()
            .with_state_tolerance(1e-8)
            .with_fidelity_tolerance(1e-6)
            .with_random_test_states(5)
            .with_seed(42);
        assert_eq!(config.state_tolerance, 1e-8);
        assert_eq!(config.fidelity_tolerance, 1e-6);
        assert_eq!(config.random_test_state_count(), 5);
        assert_eq!(config.seed, 42);
    }
}
