//! Error types for densr

use crate::matrix::Shape;
use thiserror::Error;

/// Result type alias using densr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in densr operations
#[derive(Error, Debug)]
pub enum Error {
    /// No GPU-class adapter is available
    #[error("No suitable compute device found")]
    DeviceNotFound,

    /// Device or queue creation failed
    #[error("Failed to create compute context: {reason}")]
    ContextCreationFailed {
        /// Message reported by the device API
        reason: String,
    },

    /// Kernel source did not compile
    #[error("Failed to build program for kernel '{kernel}':\n{diagnostic}")]
    ProgramBuildFailed {
        /// Kernel that failed to build
        kernel: &'static str,
        /// Compiler diagnostic text
        diagnostic: String,
    },

    /// Program compiled but the kernel entry point could not be created
    #[error("Failed to create kernel '{kernel}': {reason}")]
    KernelCreationFailed {
        /// Kernel that failed
        kernel: &'static str,
        /// Reason for the failure
        reason: String,
    },

    /// Device buffer could not be allocated
    #[error("Failed to allocate device buffer of {bytes} bytes (limit {limit})")]
    BufferAllocationFailed {
        /// Requested size in bytes
        bytes: u64,
        /// Largest size the device accepts
        limit: u64,
    },

    /// Operand shapes differ where they must match
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Expected shape
        expected: Shape,
        /// Actual shape
        got: Shape,
    },

    /// Inner dimensions of a matrix product disagree
    #[error("Dimension mismatch: lhs has {lhs_cols} columns, rhs has {rhs_rows} rows")]
    DimensionMismatch {
        /// Columns of the left operand
        lhs_cols: usize,
        /// Rows of the right operand
        rhs_rows: usize,
    },

    /// Operation issued against a context that is not ready
    #[error("Invalid state: compute context is {state}")]
    InvalidState {
        /// State the context was in
        state: &'static str,
    },

    /// Buffer length does not equal rows * cols
    #[error("Buffer of length {len} cannot hold a {rows}x{cols} matrix")]
    BufferLengthMismatch {
        /// Buffer length
        len: usize,
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
    },

    /// Backend-specific error (transfer, poll or mapping failure)
    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: Shape, got: Shape) -> Self {
        Self::ShapeMismatch { expected, got }
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
