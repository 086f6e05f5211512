//! Error types for the circuit crate.

use qkern_core::CoreError;
use thiserror::Error;

/// Errors that can occur in circuit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// A step cannot be inverted, so the circuit has no inverse.
    #[error("Step {index} ('{name}') has no known inverse")]
    NonInvertibleStep {
        /// Position of the offending step.
        index: usize,
        /// Name of the gate at that step.
        name: String,
        /// The underlying gate error.
        #[source]
        source: CoreError,
    },
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
