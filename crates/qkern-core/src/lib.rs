//! qkern single-qubit simulation core
//!
//! This crate provides the value types the qkern circuit engine is built on:
//! complex amplitudes, normalized single-qubit states and a closed library of
//! unitary gates.
//!
//! # Core Components
//!
//! - **Complex numbers**: [`Complex64`] from `num-complex`, extended by
//!   [`ComplexExt`]
//! - **States**: [`Qubit`] holds `α|0⟩ + β|1⟩` and is always normalized
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   caller-supplied transforms, unified under [`Gate`]
//! - **Matrices**: [`Unitary2x2`] as the reference form of every standard gate
//! - **Measurement**: [`Outcome`] and [`Counts`]; randomness is always injected
//!   through a [`rand::Rng`]
//!
//! # Example: Superposition and Sampling
//!
//! ```rust
//! use qkern_core::{Outcome, Qubit, StandardGate};
//! use rand::SeedableRng;
//!
//! let plus = StandardGate::H.apply(&Qubit::zero());
//! assert!((plus.probability0() - 0.5).abs() < 1e-12);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let counts = plus.measure_multiple_with_rng(1000, &mut rng);
//! assert_eq!(counts.shots(), 1000);
//! assert!(counts.get(Outcome::Zero) > 400);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Action on `α|0⟩ + β|1⟩` |
//! |------|-------------------------|
//! | `I` | identity |
//! | `X`, `Y`, `Z` | Pauli gates |
//! | `H` | Hadamard gate |
//! | `S`, `Sdg` | `β → ±iβ` |
//! | `T`, `Tdg` | `β → e^{±iπ/4}β` |
//! | `Rx`, `Ry`, `Rz` | Rotation gates |
//! | `P` | Phase gate `β → e^{iφ}β` |
//! | `U` | Universal single-qubit gate U(θ,φ,λ) |

pub mod complex;
pub mod error;
pub mod gate;
pub mod measurement;
pub mod state;
pub mod unitary;

pub use complex::{Complex64, ComplexExt};
pub use error::{CoreError, CoreResult};
pub use gate::{ANGLE_TOLERANCE, CustomGate, Gate, GateOp, StandardGate};
pub use measurement::{Counts, Outcome};
pub use state::{BlochVector, NORMALIZATION_TOLERANCE, Qubit};
pub use unitary::Unitary2x2;
