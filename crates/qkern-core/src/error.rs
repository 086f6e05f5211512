//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in gate and state operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The gate has no known algebraic inverse.
    #[error("Gate '{name}' has no known inverse")]
    NonInvertibleGate {
        /// Name of the gate.
        name: String,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
