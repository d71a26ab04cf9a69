//! Kernel bodies shared by the sequential and parallel entry points.
//!
//! Each body works on the slice of the problem it was handed and polls a
//! [`CancelToken`] at safe points. The sequential kernels call the same
//! bodies with a token nobody cancels, so both forms perform identical
//! arithmetic.

use super::CancelToken;
use crate::types::{Accumulator, Element, Matrix, RowBlockMut};

/// Elements processed by a dot-product worker between cancellation polls.
pub const CANCEL_POLL_STRIDE: usize = 4096;

#[inline]
pub(crate) fn widened_dot(v1: &[Element], v2: &[Element]) -> Accumulator {
    v1.iter()
        .zip(v2)
        .map(|(&x, &y)| Accumulator::from(x) * Accumulator::from(y))
        .sum()
}

/// Dot product of two equal-length slices at accumulator width.
///
/// Returns `None` if `cancel` was raised before the last stride finished.
pub fn dot_range(v1: &[Element], v2: &[Element], cancel: &CancelToken) -> Option<Accumulator> {
    debug_assert_eq!(v1.len(), v2.len());
    let mut acc: Accumulator = 0;
    for (c1, c2) in v1
        .chunks(CANCEL_POLL_STRIDE)
        .zip(v2.chunks(CANCEL_POLL_STRIDE))
    {
        if cancel.is_cancelled() {
            return None;
        }
        acc += widened_dot(c1, c2);
    }
    Some(acc)
}

/// Fill every row of `block` with the matching row of `a * b`.
///
/// `a` and `b` must already be known to be compatible and `block` must come
/// from a destination of shape `a.rows() x b.cols()`. Returns `false` if
/// `cancel` was raised before all rows were written; the block is then only
/// partially filled.
pub fn product_rows(
    a: &Matrix<Element>,
    b: &Matrix<Element>,
    block: &mut RowBlockMut<'_, Accumulator>,
    cancel: &CancelToken,
) -> bool {
    for (i, out) in block.rows_mut() {
        if cancel.is_cancelled() {
            return false;
        }
        out.fill(0);
        // i-k-j order: stream row k of b once per a[i, k].
        for (k, &a_ik) in a.row(i).iter().enumerate() {
            let a_ik = Accumulator::from(a_ik);
            for (cell, &b_kj) in out.iter_mut().zip(b.row(k)) {
                *cell += a_ik * Accumulator::from(b_kj);
            }
        }
    }
    true
}
