//! qkern circuit engine
//!
//! Builds, executes and analyzes single-qubit circuits on top of
//! [`qkern_core`].
//!
//! # Overview
//!
//! A [`Circuit`] binds an initial [`Qubit`] to an ordered list of gate
//! steps. It can be:
//!
//! - **executed** as a fold of gate applications ([`Circuit::execute`])
//! - **sampled** shot by shot ([`Circuit::measure_multiple_with_rng`])
//! - **optimized** by cancelling adjacent inverse pairs ([`Circuit::optimized`])
//! - **combined** with [`Circuit::composed`], [`Circuit::repeated`] and
//!   [`Circuit::inverse`]
//! - **analyzed** for normalization ([`Circuit::is_unitary`]) and compared
//!   to another circuit ([`Circuit::fidelity`])
//! - **rendered** as text ([`Circuit::ascii_diagram`])
//!
//! # Example
//!
//! ```rust
//! use qkern_circuit::Circuit;
//! use std::f64::consts::PI;
//!
//! // H · RZ(π) · H interferes destructively on |0⟩.
//! let mut circuit = Circuit::new("interference");
//! circuit.h().rz(PI).h();
//!
//! let (p0, p1) = circuit.theoretical_probabilities();
//! assert!(p0 < 1e-12);
//! assert!((p1 - 1.0).abs() < 1e-12);
//!
//! // The inverse undoes the circuit.
//! let round_trip = circuit.composed(&circuit.inverse()?);
//! assert!(round_trip.is_equivalent(&Circuit::new("identity")));
//! # Ok::<(), qkern_circuit::CircuitError>(())
//! ```

mod analysis;
pub mod circuit;
pub mod config;
mod diagram;
pub mod error;
mod library;
pub mod optimize;

pub use circuit::{Circuit, CircuitStep, ExecutionStats};
pub use config::{AnalysisConfig, DEFAULT_SEED, MIN_RANDOM_TEST_STATES};
pub use error::{CircuitError, CircuitResult};
pub use optimize::InverseCancellation;

pub use qkern_core::{Counts, Gate, Outcome, Qubit, StandardGate};
