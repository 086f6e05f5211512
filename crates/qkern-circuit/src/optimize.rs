//! Inverse-pair cancellation.

use qkern_core::Gate;
use tracing::debug;

use crate::circuit::Circuit;

/// Cancels adjacent gates that undo each other.
///
/// A single left-to-right pass over the gate list. Kept gates sit on a
/// stack; when the next gate cancels the top of the stack both are dropped,
/// which exposes the previous gate to the one after it. `H·X·X·H` therefore
/// reduces to nothing.
///
/// Matching pairs:
/// - self-inverse gates (`I`, `X`, `Y`, `Z`, `H`) with themselves
/// - `S`/`S†` and `T`/`T†`
/// - rotations and phase gates whose angles negate each other
/// - `U(θ,φ,λ)` with `U(−θ,−λ,−φ)`
///
/// Custom gates never cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseCancellation;

impl InverseCancellation {
    /// Create a new cancellation pass.
    pub fn new() -> Self {
        Self
    }

    /// Run the pass over `gates`, returning the surviving gates in order.
    #[allow(clippy::unused_self)]
    pub fn run<'a, I>(&self, gates: I) -> Vec<Gate>
    where
        I: IntoIterator<Item = &'a Gate>,
    {
        let mut kept: Vec<Gate> = Vec::new();
        for gate in gates {
            if kept.last().is_some_and(|top| top.cancels(gate)) {
                kept.pop();
            } else {
                kept.push(gate.clone());
            }
        }
        kept
    }
}

impl Circuit {
    /// A new circuit with adjacent inverse pairs removed.
    ///
    /// The original circuit is left untouched.
    pub fn optimized(&self) -> Circuit {
        let kept = InverseCancellation::new().run(self.gates());
        debug!(
            circuit = %self.name(),
            removed = self.len() - kept.len(),
            remaining = kept.len(),
            "cancelled inverse pairs"
        );
        self.derived(format!("{}_opt", self.name()), kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qkern_core::{Qubit, StandardGate};
    use std::f64::consts::PI;

    fn names(circuit: &Circuit) -> Vec<String> {
        circuit.gates().map(|g| g.name().to_string()).collect()
    }

    #[test]
    fn test_hh_cancels() {
        let mut circuit = Circuit::new("hh");
        circuit.h().h();
        let optimized = circuit.optimized();
        assert!(optimized.is_empty());
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_nested_pairs_cancel() {
        let mut circuit = Circuit::new("nested");
        circuit.h().s().t().tdg().sdg().h();
        assert!(circuit.optimized().is_empty());
    }

    #[test]
    fn test_rotation_pairs() {
        let mut circuit = Circuit::new("rot");
        circuit.rx(0.4).rx(-0.4).rz(PI).rz(PI).p(1.2).p(-1.2);
        // RZ(π)·RZ(π) is not an inverse pair.
        assert_eq!(names(&circuit.optimized()), ["rz", "rz"]);
    }

    #[test]
    fn test_universal_pair() {
        let mut circuit = Circuit::new("u");
        circuit.u(0.3, 0.5, 0.7).u(-0.3, -0.7, -0.5);
        assert!(circuit.optimized().is_empty());

        let mut circuit = Circuit::new("u");
        circuit.u(0.3, 0.5, 0.7).u(-0.3, -0.5, -0.7);
        assert_eq!(circuit.optimized().len(), 2);
    }

    #[test]
    fn test_non_adjacent_kept() {
        let mut circuit = Circuit::new("mixed");
        circuit.h().x().h();
        assert_eq!(names(&circuit.optimized()), ["h", "x", "h"]);
    }

    #[test]
    fn test_odd_run_leaves_one() {
        let mut circuit = Circuit::new("xxx");
        circuit.x().x().x();
        assert_eq!(names(&circuit.optimized()), ["x"]);
    }

    #[test]
    fn test_custom_never_cancels() {
        let mut circuit = Circuit::new("custom");
        circuit.custom("flip", |q: &Qubit| StandardGate::X.apply(q));
        circuit.custom("flip", |q: &Qubit| StandardGate::X.apply(q));
        assert_eq!(circuit.optimized().len(), 2);
    }

    #[test]
    fn test_optimized_preserves_state() {
        let mut circuit = Circuit::with_initial_state("keep", Qubit::from_real(0.6, 0.8));
        circuit.h().t().x().x().tdg().ry(0.2);
        let optimized = circuit.optimized();
        assert_eq!(names(&optimized), ["h", "ry"]);
        assert!(optimized.execute().approx_eq(&circuit.execute(), 1e-12));
    }
}
