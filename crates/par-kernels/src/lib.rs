//! Partitioned parallel integer kernels.
//!
//! This crate provides two data-parallel kernels, each in a sequential
//! reference form and a fixed-worker-count parallel form:
//!
//! | Kernel | Sequential | Parallel | Result |
//! |--------|------------|----------|--------|
//! | Dot product | [`dot_sequential`] | [`dot_parallel`] | [`Accumulator`] |
//! | Matrix product | [`matmul_sequential`] | [`matmul_parallel`] | [`Matrix<Accumulator>`] |
//!
//! Inputs are `i32` ([`Element`]); products and sums are taken at `i64`
//! ([`Accumulator`]) width, so for integer data the parallel forms return
//! exactly what the sequential forms return for any worker count.
//!
//! # How the parallel forms work
//!
//! 1. [`core::partition`] splits the work into one contiguous range per
//!    worker, the first `N % W` ranges one unit longer than the rest.
//! 2. A [`core::Launcher`] starts one scoped OS thread per non-empty range.
//!    Threads are created per call and joined before the call returns.
//! 3. Each thread reads the shared inputs and writes only what it owns: a
//!    private partial sum, or a [`RowBlockMut`] of the destination matrix
//!    split off with [`Matrix::row_blocks_mut`].
//! 4. Partial sums are added in range order; a matrix destination is
//!    already complete.
//!
//! If a thread cannot be started, already running threads are cancelled
//! through a [`core::CancelToken`] and joined, and the call returns
//! [`KernelError::Launch`] rather than a partial result.
//!
//! # Worker-count policy
//!
//! A worker count of zero is handled differently by the two kernels:
//! [`dot_parallel`] treats it as degenerate and returns `Ok(0)`, while
//! [`matmul_parallel`] rejects it with [`KernelError::NoWorkers`].
//!
//! # Quick Start
//!
//! ```
//! use par_kernels::{dot_parallel, matmul_parallel, Matrix};
//!
//! assert_eq!(dot_parallel(&[1, 2, 3], &[4, 5, 6], 4).unwrap(), 32);
//!
//! let a = Matrix::from_rows(&[[1, 2], [3, 4]]);
//! let b = Matrix::from_rows(&[[5, 6], [7, 8]]);
//! let c = matmul_parallel(&a, &b, 2).unwrap();
//! assert_eq!(c[(1, 1)], 50);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): [`matmul_batched`] spreads independent pairs over
//!   rayon's pool. The per-call kernels never use a shared pool.

pub mod api;
pub mod core;
pub mod error;
pub mod generate;
pub mod types;

pub use api::{
    compatible, dot_parallel, dot_parallel_with, dot_sequential, matmul_batched, matmul_parallel,
    matmul_parallel_with, matmul_sequential,
};
pub use error::{KernelError, Result};
pub use generate::Generator;
pub use types::{Accumulator, Element, Matrix, RowBlockMut, Shape, WorkRange};
