//! Circuit analysis: unitarity and fidelity estimation.

use qkern_core::Qubit;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::circuit::Circuit;

impl Circuit {
    /// The canonical battery of test states.
    ///
    /// `|0⟩`, `|1⟩` and `|+⟩`, followed by random states drawn from a
    /// generator seeded with the configured seed. The battery is identical
    /// for every circuit sharing a configuration.
    pub fn standard_test_states(&self) -> Vec<Qubit> {
        let config = self.config();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut states = vec![Qubit::zero(), Qubit::one(), Qubit::plus()];
        states.extend((0..config.random_test_state_count()).map(|_| Qubit::random_with_rng(&mut rng)));
        states
    }

    /// Check that the circuit maps every test state to a normalized state.
    ///
    /// Stops at the first state that drifts beyond the configured tolerance.
    pub fn is_unitary(&self) -> bool {
        let tolerance = self.config().state_tolerance;
        self.standard_test_states()
            .iter()
            .all(|state| self.execute_from(state).is_normalized_within(tolerance))
    }

    /// Average state fidelity between this circuit and `other`.
    ///
    /// Both circuits run from each test state in turn and the overlaps
    /// `|⟨ψ₁|ψ₂⟩|²` are averaged. An empty `test_states` slice falls back to
    /// [`standard_test_states`](Self::standard_test_states).
    pub fn fidelity(&self, other: &Circuit, test_states: &[Qubit]) -> f64 {
        let fallback;
        let states = if test_states.is_empty() {
            fallback = self.standard_test_states();
            &fallback[..]
        } else {
            test_states
        };

        let total: f64 = states
            .iter()
            .map(|state| self.execute_from(state).fidelity(&other.execute_from(state)))
            .sum();
        total / states.len() as f64
    }

    /// Check whether two circuits act identically on the standard test states.
    ///
    /// Global phase is ignored.
    pub fn is_equivalent(&self, other: &Circuit) -> bool {
        let fidelity = self.fidelity(other, &self.standard_test_states());
        fidelity >= 1.0 - self.config().fidelity_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_states_are_reproducible() {
        let circuit = Circuit::new("a");
        let first = circuit.standard_test_states();
        let second = Circuit::new("b").standard_test_states();

        assert_eq!(first.len(), 5);
        for (a, b) in first.iter().zip(&second) {
            assert!(a.approx_eq(b, 0.0));
        }
        assert!(first[2].approx_eq(&Qubit::plus(), 1e-15));
    }

    #[test]
    fn test_standard_states_follow_config() {
        let circuit = Circuit::new("cfg").with_config(AnalysisConfig::new().with_random_test_states(6));
        assert_eq!(circuit.standard_test_states().len(), 9);
    }

    #[test]
    fn test_is_unitary() {
        let mut circuit = Circuit::new("u");
        circuit.h().t().rx(1.1).u(0.2, 0.4, 0.6);
        assert!(circuit.is_unitary());
        assert!(Circuit::new("empty").is_unitary());
    }

    #[test]
    fn test_fidelity_of_identical_circuits() {
        let mut a = Circuit::new("a");
        a.h().s();
        let b = a.clone();
        assert!((a.fidelity(&b, &[]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fidelity_of_orthogonal_outputs() {
        let mut flip = Circuit::new("flip");
        flip.x();
        let identity = Circuit::new("id");
        let fidelity = flip.fidelity(&identity, &[Qubit::zero(), Qubit::one()]);
        assert!(fidelity.abs() < 1e-12);
    }

    #[test]
    fn test_global_phase_is_invisible() {
        // Z = i·RZ(π) differs only by a global phase.
        let mut z = Circuit::new("z");
        z.z();
        let mut rz = Circuit::new("rz");
        rz.rz(PI);
        assert!(z.is_equivalent(&rz));

        let mut x = Circuit::new("x");
        x.x();
        assert!(!z.is_equivalent(&x));
    }
}
