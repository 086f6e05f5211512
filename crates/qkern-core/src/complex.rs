//! Complex amplitudes.
//!
//! Amplitudes are plain [`Complex64`] values from `num-complex`, which already
//! supplies the full arithmetic surface (addition, subtraction, multiplication,
//! division by a complex or real scalar, negation, conjugation and `exp`).
//! [`ComplexExt`] adds the vocabulary the rest of the kernel speaks in;
//! unit phases `e^{iθ}` come from [`Complex64::cis`].
//!
//! Division by a zero-magnitude complex number follows IEEE-754 and yields
//! NaN/Inf components; callers are expected to guard against it.

pub use num_complex::Complex64;

/// `0 + 0i`.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// `1 + 0i`.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// The imaginary unit `0 + 1i`.
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// Extension methods for [`Complex64`].
pub trait ComplexExt {
    /// Euclidean length `|z|`.
    fn magnitude(&self) -> f64;

    /// Squared length `|z|²`, i.e. the Born-rule probability of an amplitude.
    fn magnitude_squared(&self) -> f64;

    /// Argument `atan2(im, re)` in `(-π, π]`.
    fn phase(&self) -> f64;

    /// Component-wise comparison within `tolerance`.
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool;
}

impl ComplexExt for Complex64 {
    #[inline]
    fn magnitude(&self) -> f64 {
        self.norm()
    }

    #[inline]
    fn magnitude_squared(&self) -> f64 {
        self.norm_sqr()
    }

    #[inline]
    fn phase(&self) -> f64 {
        self.im.atan2(self.re)
    }

    #[inline]
    fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.re - other.re).abs() <= tolerance && (self.im - other.im).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_arithmetic() {
        let a = Complex64::new(1.0, 2.0);
        let b = Complex64::new(3.0, -1.0);

        assert!((a + b).approx_eq(&Complex64::new(4.0, 1.0), EPS));
        assert!((a - b).approx_eq(&Complex64::new(-2.0, 3.0), EPS));
        // (1+2i)(3-i) = 3 - i + 6i - 2i² = 5 + 5i
        assert!((a * b).approx_eq(&Complex64::new(5.0, 5.0), EPS));
        assert!(((a * b) / b).approx_eq(&a, EPS));
        assert!((a / 2.0).approx_eq(&Complex64::new(0.5, 1.0), EPS));
        assert!((-a).approx_eq(&Complex64::new(-1.0, -2.0), EPS));
        assert!(a.conj().approx_eq(&Complex64::new(1.0, -2.0), EPS));
    }

    #[test]
    fn test_magnitude_and_phase() {
        let z = Complex64::new(3.0, 4.0);
        assert!((z.magnitude() - 5.0).abs() < EPS);
        assert!((z.magnitude_squared() - 25.0).abs() < EPS);

        assert!((I.phase() - PI / 2.0).abs() < EPS);
        assert!((Complex64::new(-1.0, 0.0).phase() - PI).abs() < EPS);
        assert!(ZERO.phase().abs() < EPS);
    }

    #[test]
    fn test_exp() {
        // e^{iπ} = -1
        let z = Complex64::new(0.0, PI).exp();
        assert!(z.approx_eq(&Complex64::new(-1.0, 0.0), EPS));

        // e^{1 + iπ/2} = e·i
        let z = Complex64::new(1.0, PI / 2.0).exp();
        assert!(z.approx_eq(&Complex64::new(0.0, std::f64::consts::E), EPS));

        assert!(Complex64::cis(PI / 2.0).approx_eq(&I, EPS));
    }

    #[test]
    fn test_divide_by_zero_propagates_non_finite() {
        let z = ONE / ZERO;
        assert!(!z.re.is_finite() || !z.im.is_finite());
    }

    #[test]
    fn test_approx_eq_tolerance() {
        let a = Complex64::new(1.0, 1.0);
        let b = Complex64::new(1.0 + 1e-9, 1.0);
        assert!(a.approx_eq(&b, 1e-8));
        assert!(!a.approx_eq(&b, 1e-10));
    }
}
