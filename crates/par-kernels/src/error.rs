//! Error types for kernel operations.

use crate::types::Shape;
use thiserror::Error;

/// Errors that can occur while running a kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    /// The two operands of a matrix product cannot be multiplied.
    #[error("Cannot multiply a {left} matrix by a {right} matrix")]
    IncompatibleShapes {
        /// Shape of the left operand.
        left: Shape,
        /// Shape of the right operand.
        right: Shape,
    },

    /// A parallel matrix product was asked to run with zero workers.
    #[error("Worker count must be at least 1")]
    NoWorkers,

    /// Backing storage does not match the declared shape.
    #[error("Dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// `rows * cols` does not fit in `usize`.
    #[error("Matrix shape {rows}x{cols} overflows the addressable element count")]
    ShapeOverflow {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// A value range with `min > max`.
    #[error("Invalid value range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },

    /// A worker thread could not be started.
    #[error("Failed to launch worker {index} ({launched} already running): {source}")]
    Launch {
        /// Index of the worker whose launch failed.
        index: usize,
        /// Number of workers launched before the failure.
        launched: usize,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
