//! Single-qubit gates.
//!
//! Every standard gate acts on a state through an explicit closed-form
//! formula; no matrix multiplication happens on the hot path. The same gates
//! are also available as [`Unitary2x2`] matrices for cross-checking.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;
use std::sync::Arc;

use crate::complex::{Complex64, I, ONE, ZERO};
use crate::error::{CoreError, CoreResult};
use crate::state::Qubit;
use crate::unitary::Unitary2x2;

/// Tolerance used when comparing gate angles.
pub const ANGLE_TOLERANCE: f64 = 1e-15;

/// Capability shared by everything that maps one state to another.
///
/// Implemented by [`StandardGate`], [`CustomGate`] and [`Gate`], and by any
/// `Fn(&Qubit) -> Qubit + Send + Sync` closure.
pub trait GateOp: Send + Sync {
    /// Apply the transform, producing a new state.
    fn apply(&self, state: &Qubit) -> Qubit;
}

impl<F> GateOp for F
where
    F: Fn(&Qubit) -> Qubit + Send + Sync,
{
    fn apply(&self, state: &Qubit) -> Qubit {
        self(state)
    }
}

/// Gates with known closed-form semantics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),
}

impl StandardGate {
    /// Lower-case mnemonic of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
        }
    }

    /// Label used in circuit diagrams, with angles to four decimals.
    pub fn symbol(&self) -> String {
        match self {
            StandardGate::I => "I".into(),
            StandardGate::X => "X".into(),
            StandardGate::Y => "Y".into(),
            StandardGate::Z => "Z".into(),
            StandardGate::H => "H".into(),
            StandardGate::S => "S".into(),
            StandardGate::Sdg => "S†".into(),
            StandardGate::T => "T".into(),
            StandardGate::Tdg => "T†".into(),
            StandardGate::Rx(theta) => format!("RX({theta:.4})"),
            StandardGate::Ry(theta) => format!("RY({theta:.4})"),
            StandardGate::Rz(theta) => format!("RZ({theta:.4})"),
            StandardGate::P(phi) => format!("P({phi:.4})"),
            StandardGate::U(theta, phi, lambda) => {
                format!("U({theta:.4},{phi:.4},{lambda:.4})")
            }
        }
    }

    /// Check if this gate takes angle parameters.
    pub fn is_parameterized(&self) -> bool {
        !self.parameters().is_empty()
    }

    /// Angle parameters of this gate, in declaration order.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(a) | StandardGate::Ry(a) | StandardGate::Rz(a) | StandardGate::P(a) => {
                vec![a]
            }
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }

    /// Check if applying this gate twice is the identity.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::I | StandardGate::X | StandardGate::Y | StandardGate::Z | StandardGate::H
        )
    }

    /// The algebraic inverse of this gate.
    ///
    /// Note that `U(θ, φ, λ)⁻¹ = U(−θ, −λ, −φ)`: the φ and λ slots swap.
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::Rx(theta) => StandardGate::Rx(-theta),
            StandardGate::Ry(theta) => StandardGate::Ry(-theta),
            StandardGate::Rz(theta) => StandardGate::Rz(-theta),
            StandardGate::P(phi) => StandardGate::P(-phi),
            StandardGate::U(theta, phi, lambda) => StandardGate::U(-theta, -lambda, -phi),
            self_inverse => self_inverse,
        }
    }

    /// Check if `other` undoes this gate.
    pub fn cancels(&self, other: &StandardGate) -> bool {
        self.inverse() == *other
    }

    /// Apply the gate's closed-form action to `state`.
    #[inline]
    pub fn apply(&self, state: &Qubit) -> Qubit {
        let a0 = state.amplitude0();
        let a1 = state.amplitude1();
        let (b0, b1) = match *self {
            StandardGate::I => (a0, a1),
            StandardGate::X => (a1, a0),
            StandardGate::Y => (-I * a1, I * a0),
            StandardGate::Z => (a0, -a1),
            StandardGate::H => ((a0 + a1) * FRAC_1_SQRT_2, (a0 - a1) * FRAC_1_SQRT_2),
            StandardGate::S => (a0, I * a1),
            StandardGate::Sdg => (a0, -I * a1),
            StandardGate::T => (a0, Complex64::cis(FRAC_PI_4) * a1),
            StandardGate::Tdg => (a0, Complex64::cis(-FRAC_PI_4) * a1),
            StandardGate::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                (c * a0 - I * s * a1, -I * s * a0 + c * a1)
            }
            StandardGate::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                (c * a0 - s * a1, s * a0 + c * a1)
            }
            StandardGate::Rz(theta) => (
                Complex64::cis(-theta / 2.0) * a0,
                Complex64::cis(theta / 2.0) * a1,
            ),
            StandardGate::P(phi) => (a0, Complex64::cis(phi) * a1),
            StandardGate::U(theta, phi, lambda) => {
                let (s, c) = (theta / 2.0).sin_cos();
                (
                    c * a0 - Complex64::cis(lambda) * s * a1,
                    Complex64::cis(phi) * s * a0 + Complex64::cis(phi + lambda) * c * a1,
                )
            }
        };
        Qubit::from_normalized(b0, b1)
    }

    /// Matrix form of this gate.
    pub fn matrix(&self) -> Unitary2x2 {
        match *self {
            StandardGate::I => Unitary2x2::identity(),
            StandardGate::X => Unitary2x2::new(ZERO, ONE, ONE, ZERO),
            StandardGate::Y => Unitary2x2::new(ZERO, -I, I, ZERO),
            StandardGate::Z => Unitary2x2::diagonal(ONE, -ONE),
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                Unitary2x2::new(h, h, h, -h)
            }
            StandardGate::S => Unitary2x2::diagonal(ONE, I),
            StandardGate::Sdg => Unitary2x2::diagonal(ONE, -I),
            StandardGate::T => Unitary2x2::diagonal(ONE, Complex64::cis(FRAC_PI_4)),
            StandardGate::Tdg => Unitary2x2::diagonal(ONE, Complex64::cis(-FRAC_PI_4)),
            StandardGate::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                let (c, s) = (Complex64::new(c, 0.0), Complex64::new(0.0, -s));
                Unitary2x2::new(c, s, s, c)
            }
            StandardGate::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                Unitary2x2::new(
                    Complex64::new(c, 0.0),
                    Complex64::new(-s, 0.0),
                    Complex64::new(s, 0.0),
                    Complex64::new(c, 0.0),
                )
            }
            StandardGate::Rz(theta) => {
                Unitary2x2::diagonal(Complex64::cis(-theta / 2.0), Complex64::cis(theta / 2.0))
            }
            StandardGate::P(phi) => Unitary2x2::diagonal(ONE, Complex64::cis(phi)),
            StandardGate::U(theta, phi, lambda) => {
                let (s, c) = (theta / 2.0).sin_cos();
                Unitary2x2::new(
                    Complex64::new(c, 0.0),
                    -Complex64::from_polar(s, lambda),
                    Complex64::from_polar(s, phi),
                    Complex64::from_polar(c, phi + lambda),
                )
            }
        }
    }
}

impl PartialEq for StandardGate {
    fn eq(&self, other: &Self) -> bool {
        fn close(a: f64, b: f64) -> bool {
            (a - b).abs() <= ANGLE_TOLERANCE
        }
        match (*self, *other) {
            (StandardGate::Rx(a), StandardGate::Rx(b))
            | (StandardGate::Ry(a), StandardGate::Ry(b))
            | (StandardGate::Rz(a), StandardGate::Rz(b))
            | (StandardGate::P(a), StandardGate::P(b)) => close(a, b),
            (StandardGate::U(t1, p1, l1), StandardGate::U(t2, p2, l2)) => {
                close(t1, t2) && close(p1, p2) && close(l1, l2)
            }
            (a, b) => std::mem::discriminant(&a) == std::mem::discriminant(&b),
        }
    }
}

impl GateOp for StandardGate {
    #[inline]
    fn apply(&self, state: &Qubit) -> Qubit {
        StandardGate::apply(self, state)
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

/// A named, caller-supplied transform.
///
/// Custom gates are opaque: they are never equal to any other gate and have
/// no known inverse. The kernel re-normalizes nothing on their behalf beyond
/// what [`Qubit::new`] already does.
#[derive(Clone)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    transform: Arc<dyn GateOp>,
}

impl CustomGate {
    /// Create a new custom gate from any transform.
    pub fn new(name: impl Into<String>, transform: impl GateOp + 'static) -> Self {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
        }
    }

    /// Apply the wrapped transform.
    pub fn apply(&self, state: &Qubit) -> Qubit {
        self.transform.apply(state)
    }
}

impl GateOp for CustomGate {
    fn apply(&self, state: &Qubit) -> Qubit {
        CustomGate::apply(self, state)
    }
}

impl fmt::Debug for CustomGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomGate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A gate, either standard or custom.
#[derive(Debug, Clone)]
pub enum Gate {
    /// A gate with known semantics.
    Standard(StandardGate),
    /// A caller-supplied transform.
    Custom(CustomGate),
}

impl Gate {
    /// Create a gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }

    /// Create a custom gate from a name and a transform.
    pub fn custom(name: impl Into<String>, transform: impl GateOp + 'static) -> Self {
        Gate::Custom(CustomGate::new(name, transform))
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Custom(g) => &g.name,
        }
    }

    /// Diagram label of this gate.
    pub fn symbol(&self) -> String {
        match self {
            Gate::Standard(g) => g.symbol(),
            Gate::Custom(g) => g.name.clone(),
        }
    }

    /// Check if this is a custom gate.
    pub fn is_custom(&self) -> bool {
        matches!(self, Gate::Custom(_))
    }

    /// The standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            Gate::Standard(g) => Some(g),
            Gate::Custom(_) => None,
        }
    }

    /// The algebraic inverse of this gate.
    ///
    /// Custom gates have unknown semantics and report
    /// [`CoreError::NonInvertibleGate`] instead of guessing.
    pub fn inverse(&self) -> CoreResult<Gate> {
        match self {
            Gate::Standard(g) => Ok(Gate::Standard(g.inverse())),
            Gate::Custom(g) => Err(CoreError::NonInvertibleGate {
                name: g.name.clone(),
            }),
        }
    }

    /// Check if `other` undoes this gate. Always `false` for custom gates.
    pub fn cancels(&self, other: &Gate) -> bool {
        match (self, other) {
            (Gate::Standard(a), Gate::Standard(b)) => a.cancels(b),
            _ => false,
        }
    }

    /// Apply the gate to `state`.
    #[inline]
    pub fn apply(&self, state: &Qubit) -> Qubit {
        match self {
            Gate::Standard(g) => g.apply(state),
            Gate::Custom(g) => g.apply(state),
        }
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Gate::Standard(a), Gate::Standard(b)) => a == b,
            _ => false,
        }
    }
}

impl GateOp for Gate {
    #[inline]
    fn apply(&self, state: &Qubit) -> Qubit {
        Gate::apply(self, state)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::Custom(gate)
    }
}
