//! Data types shared by the kernels.
//!
//! The kernels operate on fixed-width signed integers and accumulate into a
//! wider integer so that a sum of products cannot overflow for the input
//! magnitudes they are meant for:
//!
//! | Alias | Type | Role |
//! |-------|------|------|
//! | [`Element`] | `i32` | Vector and input matrix entries |
//! | [`Accumulator`] | `i64` | Dot products and product-matrix cells |
//!
//! # Core Types
//!
//! - [`Matrix`]: Bounds-checked row-major matrix, generic over its element type
//! - [`Shape`]: A `rows x cols` pair, used in error reports
//! - [`WorkRange`]: Half-open index interval assigned to exactly one worker
//! - [`RowBlockMut`]: Exclusive view over a contiguous run of matrix rows
//!
//! # Example
//!
//! ```rust
//! use par_kernels::types::Matrix;
//!
//! let m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
//! assert_eq!(m[(1, 2)], 6);
//! assert_eq!(m.shape().to_string(), "2x3");
//! ```

pub(crate) mod matrix;
mod range;

pub use matrix::{Matrix, RowBlockMut, Shape};
pub use range::WorkRange;

/// Element type of input vectors and matrices.
pub type Element = i32;

/// Wide accumulator for dot products and product-matrix cells.
pub type Accumulator = i64;
