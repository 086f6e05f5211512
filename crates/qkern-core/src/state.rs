//! Single-qubit pure states.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;

use crate::complex::{Complex64, ComplexExt, ONE, ZERO};
use crate::measurement::{Counts, Outcome};

/// Tolerance for the normalization invariant `|α|² + |β|² = 1`.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-10;

/// A single-qubit pure state `α|0⟩ + β|1⟩`.
///
/// Every constructor normalizes its input, so a `Qubit` always satisfies
/// `|α|² + |β|² = 1` within [`NORMALIZATION_TOLERANCE`]. States are values:
/// gates never mutate a `Qubit`, they return a new one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "Amplitudes")]
pub struct Qubit {
    amplitude0: Complex64,
    amplitude1: Complex64,
}

/// Wire form of a [`Qubit`]; deserialization goes through [`Qubit::new`].
#[derive(Deserialize)]
struct Amplitudes {
    amplitude0: Complex64,
    amplitude1: Complex64,
}

impl From<Amplitudes> for Qubit {
    fn from(raw: Amplitudes) -> Self {
        Qubit::new(raw.amplitude0, raw.amplitude1)
    }
}

impl Qubit {
    /// Create a state from raw amplitudes, normalizing them.
    ///
    /// A zero (or non-finite) norm has no direction to normalize towards;
    /// the canonical `|0⟩` state is returned instead.
    pub fn new(amplitude0: Complex64, amplitude1: Complex64) -> Self {
        // hypot avoids overflow and underflow of |α|² + |β|².
        let norm = amplitude0.norm().hypot(amplitude1.norm());
        if norm == 0.0 || !norm.is_finite() {
            return Self::zero();
        }
        if (norm * norm - 1.0).abs() <= NORMALIZATION_TOLERANCE {
            return Self {
                amplitude0,
                amplitude1,
            };
        }
        Self {
            amplitude0: amplitude0 / norm,
            amplitude1: amplitude1 / norm,
        }
    }

    /// Wrap amplitudes that are already normalized. No renormalization.
    #[inline]
    pub(crate) const fn from_normalized(amplitude0: Complex64, amplitude1: Complex64) -> Self {
        Self {
            amplitude0,
            amplitude1,
        }
    }

    /// Create a state from real amplitudes `α|0⟩ + β|1⟩`.
    pub fn from_real(alpha: f64, beta: f64) -> Self {
        Self::new(Complex64::new(alpha, 0.0), Complex64::new(beta, 0.0))
    }

    /// Create the state `cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩`.
    pub fn from_bloch_angles(theta: f64, phi: f64) -> Self {
        let half = theta / 2.0;
        Self::new(
            Complex64::new(half.cos(), 0.0),
            Complex64::from_polar(half.sin(), phi),
        )
    }

    /// The computational basis state `|0⟩`.
    pub const fn zero() -> Self {
        Self {
            amplitude0: ONE,
            amplitude1: ZERO,
        }
    }

    /// The computational basis state `|1⟩`.
    pub const fn one() -> Self {
        Self {
            amplitude0: ZERO,
            amplitude1: ONE,
        }
    }

    /// `|+⟩ = (|0⟩ + |1⟩)/√2`.
    pub fn plus() -> Self {
        Self::from_real(FRAC_1_SQRT_2, FRAC_1_SQRT_2)
    }

    /// `|−⟩ = (|0⟩ − |1⟩)/√2`.
    pub fn minus() -> Self {
        Self::from_real(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)
    }

    /// `|+i⟩ = (|0⟩ + i|1⟩)/√2`.
    pub fn plus_i() -> Self {
        Self::new(
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(0.0, FRAC_1_SQRT_2),
        )
    }

    /// `|−i⟩ = (|0⟩ − i|1⟩)/√2`.
    pub fn minus_i() -> Self {
        Self::new(
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(0.0, -FRAC_1_SQRT_2),
        )
    }

    /// Draw `θ ∈ [0, π]` and `φ ∈ [0, 2π)` uniformly and build the state.
    ///
    /// Intended for fuzzing and test batteries, not for anything that needs
    /// cryptographic randomness.
    pub fn random_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let theta = rng.gen_range(0.0..=PI);
        let phi = rng.gen_range(0.0..2.0 * PI);
        Self::from_bloch_angles(theta, phi)
    }

    /// Random state using the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with_rng(&mut rand::thread_rng())
    }

    /// Amplitude of `|0⟩`.
    #[inline]
    pub fn amplitude0(&self) -> Complex64 {
        self.amplitude0
    }

    /// Amplitude of `|1⟩`.
    #[inline]
    pub fn amplitude1(&self) -> Complex64 {
        self.amplitude1
    }

    /// Probability of measuring `0`.
    #[inline]
    pub fn probability0(&self) -> f64 {
        self.amplitude0.magnitude_squared()
    }

    /// Probability of measuring `1`.
    #[inline]
    pub fn probability1(&self) -> f64 {
        self.amplitude1.magnitude_squared()
    }

    /// Check the normalization invariant.
    pub fn is_normalized(&self) -> bool {
        self.is_normalized_within(NORMALIZATION_TOLERANCE)
    }

    /// Check the normalization invariant against a custom tolerance.
    pub fn is_normalized_within(&self, tolerance: f64) -> bool {
        (self.probability0() + self.probability1() - 1.0).abs() <= tolerance
    }

    /// Bloch-sphere coordinates `(x, y, z)`.
    ///
    /// `x = 2(Re α Re β + Im α Im β)`, `y = 2(Re β Im α − Re α Im β)` and
    /// `z = p0 − p1`. Note the sign of `y`: a state built with
    /// [`from_bloch_angles`](Self::from_bloch_angles)`(θ, φ)` lands at
    /// `(sin θ cos φ, −sin θ sin φ, cos θ)`.
    pub fn bloch_coordinates(&self) -> (f64, f64, f64) {
        let (a, b) = (self.amplitude0, self.amplitude1);
        let x = 2.0 * (a.re * b.re + a.im * b.im);
        let y = 2.0 * (b.re * a.im - a.re * b.im);
        let z = self.probability0() - self.probability1();
        (x, y, z)
    }

    /// Bloch-sphere coordinates as a [`BlochVector`].
    pub fn bloch_vector(&self) -> BlochVector {
        let (x, y, z) = self.bloch_coordinates();
        BlochVector { x, y, z }
    }

    /// Polar and azimuthal angles `(θ, φ)` such that
    /// `from_bloch_angles(θ, φ)` reproduces this state up to global phase.
    pub fn bloch_angles(&self) -> (f64, f64) {
        let (x, y, z) = self.bloch_coordinates();
        let theta = z.clamp(-1.0, 1.0).acos();
        // y is mirrored relative to the azimuth used by from_bloch_angles.
        let phi = (-y).atan2(x);
        (theta, phi)
    }

    /// Shannon entropy of the measurement distribution, in bits.
    pub fn entropy(&self) -> f64 {
        let (p0, p1) = (self.probability0(), self.probability1());
        if p0 <= 0.0 || p1 <= 0.0 {
            return 0.0;
        }
        -(p0 * p0.log2() + p1 * p1.log2())
    }

    /// Inner product `⟨self|other⟩`.
    pub fn inner_product(&self, other: &Qubit) -> Complex64 {
        self.amplitude0.conj() * other.amplitude0 + self.amplitude1.conj() * other.amplitude1
    }

    /// State fidelity `|⟨self|other⟩|²`, in `[0, 1]`.
    pub fn fidelity(&self, other: &Qubit) -> f64 {
        self.inner_product(other).magnitude_squared()
    }

    /// Amplitude-wise comparison within `tolerance` (global phase matters).
    pub fn approx_eq(&self, other: &Qubit, tolerance: f64) -> bool {
        self.amplitude0.approx_eq(&other.amplitude0, tolerance)
            && self.amplitude1.approx_eq(&other.amplitude1, tolerance)
    }

    /// Sample one measurement outcome.
    ///
    /// Draws `u ∈ [0, 1)` and returns [`Outcome::Zero`] when `u < p0`.
    pub fn measure_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let sample: f64 = rng.r#gen();
        if sample < self.probability0() {
            Outcome::Zero
        } else {
            Outcome::One
        }
    }

    /// Sample one measurement outcome using the thread-local RNG.
    pub fn measure(&self) -> Outcome {
        self.measure_with_rng(&mut rand::thread_rng())
    }

    /// Sample `shots` outcomes and tally them.
    pub fn measure_multiple_with_rng<R: Rng + ?Sized>(&self, shots: u64, rng: &mut R) -> Counts {
        let mut counts = Counts::new();
        for _ in 0..shots {
            counts.record(self.measure_with_rng(rng));
        }
        counts
    }

    /// Sample `shots` outcomes using the thread-local RNG.
    pub fn measure_multiple(&self, shots: u64) -> Counts {
        self.measure_multiple_with_rng(shots, &mut rand::thread_rng())
    }

    /// Multi-line summary: amplitudes, probabilities, Bloch vector, entropy.
    pub fn describe(&self) -> String {
        let (x, y, z) = self.bloch_coordinates();
        format!(
            "State: {self}\nP(0) = {:.4}, P(1) = {:.4}\nBloch: ({x:.4}, {y:.4}, {z:.4})\nEntropy: {:.4} bits",
            self.probability0(),
            self.probability1(),
            self.entropy(),
        )
    }
}

impl Default for Qubit {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|0⟩ + {}|1⟩",
            format_amplitude(self.amplitude0),
            format_amplitude(self.amplitude1)
        )
    }
}

/// Render an amplitude compactly: real values bare, complex ones parenthesized.
fn format_amplitude(z: Complex64) -> String {
    if z.im.abs() < 5e-5 {
        format!("{:.4}", z.re)
    } else if z.re.abs() < 5e-5 {
        format!("{:.4}i", z.im)
    } else {
        let sign = if z.im < 0.0 { '-' } else { '+' };
        format!("({:.4}{sign}{:.4}i)", z.re, z.im.abs())
    }
}

/// A point on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl BlochVector {
    /// Euclidean length; `1` for every pure state.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_new_normalizes() {
        let q = Qubit::new(Complex64::new(3.0, 0.0), Complex64::new(0.0, 4.0));
        assert!(q.is_normalized());
        assert!((q.probability0() - 0.36).abs() < EPS);
        assert!((q.probability1() - 0.64).abs() < EPS);
    }

    #[test]
    fn test_huge_amplitudes_normalize() {
        let q = Qubit::from_real(1e200, 1e200);
        assert!(q.is_normalized());
        assert!(q.approx_eq(&Qubit::plus(), EPS));
    }

    #[test]
    fn test_tiny_amplitudes_normalize() {
        let q = Qubit::from_real(1e-200, 1e-200);
        assert!(q.is_normalized());
        assert!(q.approx_eq(&Qubit::plus(), EPS));

        let q = Qubit::new(Complex64::new(0.0, 0.0), Complex64::new(0.0, 1e-300));
        assert!(q.approx_eq(&Qubit::new(ZERO, Complex64::new(0.0, 1.0)), EPS));
    }

    #[test]
    fn test_zero_norm_falls_back_to_ground_state() {
        let q = Qubit::new(ZERO, ZERO);
        assert!(q.approx_eq(&Qubit::zero(), 0.0));

        let q = Qubit::from_real(f64::NAN, 1.0);
        assert!(q.approx_eq(&Qubit::zero(), 0.0));
    }

    #[test]
    fn test_from_real_probabilities() {
        let q = Qubit::from_real(0.6, 0.8);
        assert!((q.probability0() - 0.36).abs() < 1e-12);
        assert!((q.probability1() - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_named_states() {
        for q in [
            Qubit::zero(),
            Qubit::one(),
            Qubit::plus(),
            Qubit::minus(),
            Qubit::plus_i(),
            Qubit::minus_i(),
        ] {
            assert!(q.is_normalized());
        }
        assert!((Qubit::plus().probability0() - 0.5).abs() < EPS);
        assert!(Qubit::one().probability0().abs() < EPS);
    }

    #[test]
    fn test_bloch_coordinates_of_basis_states() {
        let (x, y, z) = Qubit::zero().bloch_coordinates();
        assert!(x.abs() < EPS && y.abs() < EPS && (z - 1.0).abs() < EPS);

        let (x, y, z) = Qubit::one().bloch_coordinates();
        assert!(x.abs() < EPS && y.abs() < EPS && (z + 1.0).abs() < EPS);

        let (x, y, z) = Qubit::plus().bloch_coordinates();
        assert!((x - 1.0).abs() < EPS && y.abs() < EPS && z.abs() < EPS);

        // |+i⟩ sits at y = -1 under this sign convention.
        let (x, y, z) = Qubit::plus_i().bloch_coordinates();
        assert!(x.abs() < EPS && (y + 1.0).abs() < EPS && z.abs() < EPS);
    }

    #[test]
    fn test_bloch_angles_round_trip() {
        let (theta, phi) = (1.1, 0.7);
        let q = Qubit::from_bloch_angles(theta, phi);
        let (x, y, z) = q.bloch_coordinates();

        assert!((x - theta.sin() * phi.cos()).abs() < EPS);
        assert!((y + theta.sin() * phi.sin()).abs() < EPS);
        assert!((z - theta.cos()).abs() < EPS);

        let (t2, p2) = q.bloch_angles();
        assert!((t2 - theta).abs() < EPS);
        assert!((p2 - phi).abs() < EPS);
        assert!((Qubit::from_bloch_angles(t2, p2).fidelity(&q) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_bloch_vector_is_unit_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let v = Qubit::random_with_rng(&mut rng).bloch_vector();
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_entropy() {
        assert_eq!(Qubit::zero().entropy(), 0.0);
        assert_eq!(Qubit::one().entropy(), 0.0);
        assert!((Qubit::plus().entropy() - 1.0).abs() < EPS);

        let q = Qubit::from_real(0.6, 0.8);
        let expected = -(0.36_f64 * 0.36_f64.log2() + 0.64_f64 * 0.64_f64.log2());
        assert!((q.entropy() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fidelity() {
        assert!((Qubit::zero().fidelity(&Qubit::zero()) - 1.0).abs() < EPS);
        assert!(Qubit::zero().fidelity(&Qubit::one()).abs() < EPS);
        assert!((Qubit::zero().fidelity(&Qubit::plus()) - 0.5).abs() < EPS);

        // Global phase does not change fidelity.
        let phased = Qubit::new(-Qubit::plus().amplitude0(), -Qubit::plus().amplitude1());
        assert!((phased.fidelity(&Qubit::plus()) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_measure_basis_states_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(Qubit::zero().measure_with_rng(&mut rng), Outcome::Zero);
            assert_eq!(Qubit::one().measure_with_rng(&mut rng), Outcome::One);
        }
    }

    #[test]
    fn test_measure_multiple_with_seeded_rng_is_reproducible() {
        let a = Qubit::plus().measure_multiple_with_rng(500, &mut StdRng::seed_from_u64(9));
        let b = Qubit::plus().measure_multiple_with_rng(500, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.shots(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(Qubit::zero().to_string(), "1.0000|0⟩ + 0.0000|1⟩");
        assert_eq!(Qubit::plus_i().to_string(), "0.7071|0⟩ + 0.7071i|1⟩");
        assert!(Qubit::plus().describe().contains("Entropy: 1.0000 bits"));
    }

    #[test]
    fn test_serde_round_trip_renormalizes() {
        let json = r#"{"amplitude0":[3.0,0.0],"amplitude1":[4.0,0.0]}"#;
        let q: Qubit = serde_json::from_str(json).unwrap();
        assert!(q.is_normalized());
        assert!((q.probability0() - 0.36).abs() < EPS);

        let back = serde_json::to_string(&q).unwrap();
        let again: Qubit = serde_json::from_str(&back).unwrap();
        assert!(again.approx_eq(&q, EPS));
    }
}
