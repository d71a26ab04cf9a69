use tracing::debug;

use crate::core::{
    dot_range, partition, product_rows, widened_dot, CancelToken, Launcher, SpawnPolicy,
};
use crate::error::{KernelError, Result};
use crate::types::{Accumulator, Element, Matrix, WorkRange};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn assert_same_len(v1: &[Element], v2: &[Element]) {
    assert_eq!(
        v1.len(),
        v2.len(),
        "Vector lengths differ: v1 has {} elements, v2 has {}",
        v1.len(),
        v2.len()
    );
}

/// Sequential dot product `v1 · v2`.
///
/// Each product is taken at [`Accumulator`] width before it is summed, so
/// `i32` inputs never overflow an intermediate product.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
///
/// # Example
///
/// ```
/// use par_kernels::dot_sequential;
///
/// assert_eq!(dot_sequential(&[1, 2, 3], &[4, 5, 6]), 32);
/// ```
pub fn dot_sequential(v1: &[Element], v2: &[Element]) -> Accumulator {
    assert_same_len(v1, v2);
    widened_dot(v1, v2)
}

/// Parallel dot product `v1 · v2` on `workers` threads.
///
/// The index space is split with [`partition`]; every non-empty range is
/// reduced on its own thread into a private partial, and the partials are
/// summed in range order. The result equals [`dot_sequential`] for every
/// worker count.
///
/// `workers == 0` is a degenerate request and yields `Ok(0)` without
/// starting any thread.
///
/// # Errors
///
/// Returns [`KernelError::Launch`] if a worker thread cannot be started.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
///
/// # Example
///
/// ```
/// use par_kernels::dot_parallel;
///
/// assert_eq!(dot_parallel(&[1, 2, 3], &[4, 5, 6], 2).unwrap(), 32);
/// assert_eq!(dot_parallel(&[1, 2, 3], &[4, 5, 6], 0).unwrap(), 0);
/// ```
pub fn dot_parallel(v1: &[Element], v2: &[Element], workers: usize) -> Result<Accumulator> {
    dot_parallel_with(&Launcher::new(), v1, v2, workers)
}

/// [`dot_parallel`] using a caller-supplied launcher.
pub fn dot_parallel_with<S: SpawnPolicy>(
    launcher: &Launcher<S>,
    v1: &[Element],
    v2: &[Element],
    workers: usize,
) -> Result<Accumulator> {
    assert_same_len(v1, v2);
    if workers == 0 {
        return Ok(0);
    }

    let jobs: Vec<_> = partition(v1.len(), workers)
        .filter(|range| !range.is_empty())
        .map(|range| {
            let x = &v1[range.as_range()];
            let y = &v2[range.as_range()];
            move |cancel: &CancelToken| dot_range(x, y, cancel)
        })
        .collect();
    debug!(n = v1.len(), workers, active = jobs.len(), "dot product");

    let partials = launcher.launch(jobs)?;
    // The token is only raised by a failed launch, so every partial is present.
    Ok(partials.into_iter().flatten().sum())
}

/// Check whether `a * b` is defined: both operands hold data and
/// `a.cols() == b.rows()`.
///
/// # Example
///
/// ```
/// use par_kernels::{compatible, Matrix};
///
/// let a: Matrix = Matrix::zeros(2, 3);
/// assert!(compatible(&a, &Matrix::zeros(3, 4)));
/// assert!(!compatible(&a, &Matrix::zeros(4, 2)));
/// ```
pub fn compatible(a: &Matrix, b: &Matrix) -> bool {
    !a.is_empty() && !b.is_empty() && a.cols() == b.rows()
}

fn check_compatible(a: &Matrix, b: &Matrix) -> Result<()> {
    if compatible(a, b) {
        Ok(())
    } else {
        Err(KernelError::IncompatibleShapes {
            left: a.shape(),
            right: b.shape(),
        })
    }
}

/// Sequential matrix product `a * b`.
///
/// Every cell of the `a.rows() x b.cols()` result holds the full sum of
/// products at [`Accumulator`] width.
///
/// # Errors
///
/// Returns [`KernelError::IncompatibleShapes`] if `!compatible(a, b)`.
///
/// # Example
///
/// ```
/// use par_kernels::{matmul_sequential, Matrix};
///
/// let a = Matrix::from_rows(&[[1, 2], [3, 4]]);
/// let b = Matrix::from_rows(&[[5, 6], [7, 8]]);
/// let c = matmul_sequential(&a, &b).unwrap();
/// assert_eq!(c, Matrix::from_rows(&[[19i64, 22], [43, 50]]));
/// ```
pub fn matmul_sequential(a: &Matrix, b: &Matrix) -> Result<Matrix<Accumulator>> {
    check_compatible(a, b)?;

    let mut dest = Matrix::zeros(a.rows(), b.cols());
    let cancel = CancelToken::new();
    for mut block in dest.row_blocks_mut([WorkRange::new(0, a.rows())]) {
        product_rows(a, b, &mut block, &cancel);
    }
    Ok(dest)
}

/// Parallel matrix product `a * b` on `workers` threads.
///
/// The destination's rows are split with [`partition`] and each non-empty
/// row block is moved into its own worker, which is the only writer of
/// those rows. `a` and `b` are shared read-only. Once every worker has been
/// joined the destination is complete; there is no merge step.
///
/// # Errors
///
/// - [`KernelError::NoWorkers`] if `workers == 0`
/// - [`KernelError::IncompatibleShapes`] if `!compatible(a, b)`
/// - [`KernelError::Launch`] if a worker cannot be started; the partially
///   written destination is dropped
///
/// # Example
///
/// ```
/// use par_kernels::{matmul_parallel, Matrix};
///
/// let a = Matrix::from_rows(&[[1, 2], [3, 4]]);
/// let b = Matrix::from_rows(&[[5, 6], [7, 8]]);
/// let c = matmul_parallel(&a, &b, 2).unwrap();
/// assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
/// ```
pub fn matmul_parallel(a: &Matrix, b: &Matrix, workers: usize) -> Result<Matrix<Accumulator>> {
    matmul_parallel_with(&Launcher::new(), a, b, workers)
}

/// [`matmul_parallel`] using a caller-supplied launcher.
pub fn matmul_parallel_with<S: SpawnPolicy>(
    launcher: &Launcher<S>,
    a: &Matrix,
    b: &Matrix,
    workers: usize,
) -> Result<Matrix<Accumulator>> {
    if workers == 0 {
        return Err(KernelError::NoWorkers);
    }
    check_compatible(a, b)?;

    let mut dest = Matrix::zeros(a.rows(), b.cols());
    let jobs: Vec<_> = dest
        .row_blocks_mut(partition(a.rows(), workers))
        .into_iter()
        .filter(|block| !block.is_empty())
        .map(|mut block| move |cancel: &CancelToken| product_rows(a, b, &mut block, cancel))
        .collect();
    debug!(
        left = %a.shape(),
        right = %b.shape(),
        workers,
        active = jobs.len(),
        "matrix product"
    );

    let completed = launcher.launch(jobs)?;
    debug_assert!(completed.iter().all(|&done| done));
    Ok(dest)
}

/// Batched matrix product: `C[i] = A[i] * B[i]`.
///
/// With the `parallel` feature the pairs are spread over rayon's pool;
/// each pair itself is multiplied sequentially.
///
/// # Errors
///
/// Returns the first [`KernelError::IncompatibleShapes`] encountered if any
/// pair cannot be multiplied.
///
/// # Panics
///
/// Panics if the batches have different lengths.
///
/// # Example
///
/// ```
/// use par_kernels::{matmul_batched, Matrix};
///
/// let a = vec![Matrix::from_rows(&[[1, 2]]), Matrix::from_rows(&[[3, 4]])];
/// let b = vec![Matrix::from_rows(&[[1], [1]]), Matrix::from_rows(&[[2], [0]])];
/// let c = matmul_batched(&a, &b).unwrap();
/// assert_eq!(c[0].as_slice(), &[3]);
/// assert_eq!(c[1].as_slice(), &[6]);
/// ```
pub fn matmul_batched(
    a_batch: &[Matrix],
    b_batch: &[Matrix],
) -> Result<Vec<Matrix<Accumulator>>> {
    assert_eq!(
        a_batch.len(),
        b_batch.len(),
        "Batch sizes must match: A has {} matrices, B has {}",
        a_batch.len(),
        b_batch.len()
    );

    #[cfg(feature = "parallel")]
    {
        a_batch
            .par_iter()
            .zip(b_batch.par_iter())
            .map(|(a, b)| matmul_sequential(a, b))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        a_batch
            .iter()
            .zip(b_batch.iter())
            .map(|(a, b)| matmul_sequential(a, b))
            .collect()
    }
}
