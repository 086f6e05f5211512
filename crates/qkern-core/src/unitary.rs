//! 2x2 unitary matrices.
//!
//! Gates act on states through closed-form formulas (see [`crate::gate`]);
//! matrices are the reference representation used to cross-check those
//! formulas and to collapse a whole circuit into a single operator.

use num_complex::Complex64;

use crate::complex::{ComplexExt, ONE, ZERO};
use crate::state::Qubit;

/// Tolerance for matrix comparisons.
const EPSILON: f64 = 1e-10;

/// A 2x2 complex matrix in row-major order: `[[a, b], [c, d]]`.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order.
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a matrix from its four elements.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Diagonal matrix `diag(d0, d1)`.
    pub fn diagonal(d0: Complex64, d1: Complex64) -> Self {
        Self::new(d0, ZERO, ZERO, d1)
    }

    /// Matrix product `self · other` (apply `other` first).
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// Check `U†U = I`.
    pub fn is_unitary(&self) -> bool {
        self.dagger().mul(self).approx_eq(&Self::identity(), EPSILON)
    }

    /// Check whether this is the identity up to a global phase.
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        b.norm() < EPSILON && c.norm() < EPSILON && (a - d).norm() < EPSILON
    }

    /// Element-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(x, y)| x.approx_eq(y, tolerance))
    }

    /// Multiply the column vector `(α, β)` of `state`.
    ///
    /// The product goes through [`Qubit::new`], so a non-unitary matrix still
    /// yields a normalized state.
    pub fn apply(&self, state: &Qubit) -> Qubit {
        let [a, b, c, d] = self.data;
        let (a0, a1) = (state.amplitude0(), state.amplitude1());
        Qubit::new(a * a0 + b * a1, c * a0 + d * a1)
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
