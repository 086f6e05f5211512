//! Predefined circuits.

use std::f64::consts::PI;

use qkern_core::{Qubit, StandardGate};
use rand::Rng;
use tracing::debug;

use crate::circuit::Circuit;

/// Fixed gates available to [`Circuit::random`].
const FIXED_PALETTE: [StandardGate; 8] = [
    StandardGate::H,
    StandardGate::X,
    StandardGate::Y,
    StandardGate::Z,
    StandardGate::S,
    StandardGate::Sdg,
    StandardGate::T,
    StandardGate::Tdg,
];

/// Rotation angles available to [`Circuit::random`].
const ANGLE_PALETTE: [f64; 4] = [PI / 8.0, PI / 4.0, PI / 2.0, PI];

/// Rotation constructors available to [`Circuit::random`].
const ROTATION_PALETTE: [fn(f64) -> StandardGate; 4] =
    [StandardGate::Rx, StandardGate::Ry, StandardGate::Rz, StandardGate::P];

impl Circuit {
    /// Single-qubit "Bell" demo: `|0⟩` followed by a Hadamard.
    ///
    /// With one qubit there is nothing to entangle; the circuit prepares the
    /// equal superposition `|+⟩`.
    pub fn bell() -> Self {
        let mut circuit = Self::new("bell");
        circuit.h();
        circuit
    }

    /// Single-qubit QFT, which reduces to one Hadamard.
    pub fn qft() -> Self {
        let mut circuit = Self::new("qft");
        circuit.h();
        circuit
    }

    /// Random circuit of `depth` gates drawn from a fixed palette.
    ///
    /// Each step is either one of `H, X, Y, Z, S, S†, T, T†` or an
    /// `RX/RY/RZ/P` rotation by one of `π/8, π/4, π/2, π`.
    pub fn random_with_rng<R: Rng + ?Sized>(depth: usize, rng: &mut R) -> Self {
        let choices = FIXED_PALETTE.len() + ROTATION_PALETTE.len();
        let mut circuit = Self::new(format!("random_{depth}"));
        for _ in 0..depth {
            let pick = rng.gen_range(0..choices);
            let gate = match FIXED_PALETTE.get(pick) {
                Some(gate) => *gate,
                None => {
                    let rotation = ROTATION_PALETTE[pick - FIXED_PALETTE.len()];
                    rotation(ANGLE_PALETTE[rng.gen_range(0..ANGLE_PALETTE.len())])
                }
            };
            circuit.add_gate(gate);
        }
        debug!(depth, "generated random circuit");
        circuit
    }

    /// Random circuit using the thread-local RNG.
    pub fn random(depth: usize) -> Self {
        Self::random_with_rng(depth, &mut rand::thread_rng())
    }

    /// Circuit that prepares `target` from `|0⟩` with a single `U(θ, φ, 0)`.
    ///
    /// `θ = acos(z)` and `φ` come from [`Qubit::bloch_angles`]. The azimuth is
    /// read from the mirrored `y` coordinate, `φ = atan2(−y, x)`, so the
    /// prepared state matches `target` up to global phase. `atan2(y, x)`
    /// would prepare its mirror image.
    pub fn state_preparation(target: &Qubit) -> Self {
        let (theta, phi) = target.bloch_angles();
        let mut circuit = Self::new("state_preparation");
        circuit.u(theta, phi, 0.0);
        circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bell_and_qft() {
        for circuit in [Circuit::bell(), Circuit::qft()] {
            assert_eq!(circuit.len(), 1);
            let (p0, p1) = circuit.theoretical_probabilities();
            assert!((p0 - 0.5).abs() < 1e-12);
            assert!((p1 - 0.5).abs() < 1e-12);
        }
        assert_eq!(Circuit::bell().name(), "bell");
    }

    #[test]
    fn test_random_depth_and_reproducibility() {
        let a = Circuit::random_with_rng(25, &mut StdRng::seed_from_u64(11));
        let b = Circuit::random_with_rng(25, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.len(), 25);
        assert!(a.gates().eq(b.gates()));
        assert!(Circuit::random(0).is_empty());
    }

    #[test]
    fn test_random_uses_palette() {
        let circuit = Circuit::random_with_rng(200, &mut StdRng::seed_from_u64(5));
        for gate in circuit.gates() {
            let gate = gate.as_standard().unwrap();
            for angle in gate.parameters() {
                assert!(ANGLE_PALETTE.contains(&angle));
            }
            assert!(!matches!(gate, StandardGate::I | StandardGate::U(..)));
        }
        assert!(circuit.is_unitary());
    }

    #[test]
    fn test_state_preparation_reaches_target() {
        let mut rng = StdRng::seed_from_u64(17);
        let targets = [
            Qubit::zero(),
            Qubit::one(),
            Qubit::plus(),
            Qubit::minus_i(),
            Qubit::from_real(0.6, 0.8),
            Qubit::random_with_rng(&mut rng),
            Qubit::random_with_rng(&mut rng),
        ];
        for target in targets {
            let prepared = Circuit::state_preparation(&target).execute();
            assert!(
                (prepared.fidelity(&target) - 1.0).abs() < 1e-9,
                "failed to prepare {target}"
            );
        }
    }
}
