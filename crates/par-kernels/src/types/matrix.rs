use std::fmt;
use std::ops::{Index, IndexMut, Range};

use super::range::WorkRange;
use super::Element;
use crate::error::{KernelError, Result};

/// Columns printed before eliding the middle of a wide row.
const DISPLAY_HEAD_COLS: usize = 15;
/// Columns printed after the elision marker.
const DISPLAY_TAIL_COLS: usize = 5;

/// Dimensions of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Shape {
    /// Number of elements a matrix of this shape holds.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// True if the shape holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A dense matrix stored in row-major order.
///
/// The backing buffer always holds exactly `rows * cols` elements; this is
/// checked once at construction. Element `(i, j)` lives at `i * cols + j` and
/// every access through [`Index`] is bounds-checked against the shape, not
/// just against the buffer length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T = Element> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// - [`KernelError::ShapeOverflow`] if `rows * cols` overflows `usize`
    /// - [`KernelError::DimensionMismatch`] if `data.len() != rows * cols`
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(KernelError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `rows x cols` shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// True if the matrix has no backing elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked element access.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows && j < self.cols {
            self.data.get(i * self.cols + j)
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(
            i < self.rows,
            "row {i} out of bounds for {} matrix",
            self.shape()
        );
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The row-major backing buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Split the matrix into disjoint mutable row blocks.
    ///
    /// `ranges` must be contiguous, in increasing order and start at row 0;
    /// they need not reach the last row. Each returned block exclusively
    /// borrows its rows, so blocks can be moved into separate workers.
    ///
    /// # Panics
    ///
    /// Panics if the ranges leave a gap, overlap, or run past the last row.
    pub fn row_blocks_mut<I>(&mut self, ranges: I) -> Vec<RowBlockMut<'_, T>>
    where
        I: IntoIterator<Item = WorkRange>,
    {
        let cols = self.cols;
        let rows = self.rows;
        let mut rest: &mut [T] = &mut self.data;
        let mut next_row = 0;
        let mut blocks = Vec::new();

        for range in ranges {
            assert_eq!(
                range.start, next_row,
                "row range {range} does not start where the previous one ended"
            );
            assert!(
                range.end <= rows,
                "row range {range} runs past the last row ({rows} rows)"
            );
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * cols);
            rest = tail;
            blocks.push(RowBlockMut {
                first_row: range.start,
                cols,
                data: head,
            });
            next_row = range.end;
        }

        blocks
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {} matrix",
            self.shape()
        );
        i * self.cols + j
    }
}

/// Number of elements in a `rows x cols` matrix, if it fits in `usize`.
pub(crate) fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(KernelError::ShapeOverflow { rows, cols })
}

impl<T: Clone + Default> Matrix<T> {
    /// Allocate a matrix filled with `T::default()` (zero for integers).
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = match element_count(rows, cols) {
            Ok(len) => len,
            Err(err) => panic!("{err}"),
        };
        Self {
            data: vec![T::default(); len],
            rows,
            cols,
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Build a matrix from fixed-width row arrays.
    ///
    /// ```rust
    /// use par_kernels::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1, 2], [3, 4]]);
    /// assert_eq!(m.row(1), &[3, 4]);
    /// ```
    pub fn from_rows<const C: usize>(rows: &[[T; C]]) -> Self {
        let data = rows.iter().flat_map(|row| row.iter().cloned()).collect();
        Self {
            data,
            rows: rows.len(),
            cols: C,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.offset(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let offset = self.offset(i, j);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    /// Prints the shape followed by one line per row. Rows wider than 20
    /// columns show the first 15 and the last 5 entries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} matrix:", self.shape())?;
        let elide = self.cols > DISPLAY_HEAD_COLS + DISPLAY_TAIL_COLS;
        for i in 0..self.rows {
            let row = self.row(i);
            write!(f, "| ")?;
            if elide {
                for value in &row[..DISPLAY_HEAD_COLS] {
                    write!(f, "{value:5}")?;
                }
                write!(f, " ... ")?;
                for value in &row[self.cols - DISPLAY_TAIL_COLS..] {
                    write!(f, "{value:5}")?;
                }
            } else {
                for value in row {
                    write!(f, "{value:5}")?;
                }
            }
            writeln!(f, " |")?;
        }
        Ok(())
    }
}

/// Exclusive mutable view over a contiguous run of matrix rows.
///
/// Produced by [`Matrix::row_blocks_mut`]. Row indices passed to and returned
/// from a block are global (relative to the whole matrix).
#[derive(Debug)]
pub struct RowBlockMut<'a, T> {
    first_row: usize,
    cols: usize,
    data: &'a mut [T],
}

impl<'a, T> RowBlockMut<'a, T> {
    /// Global row indices covered by this block.
    pub fn rows(&self) -> Range<usize> {
        let count = if self.cols == 0 {
            0
        } else {
            self.data.len() / self.cols
        };
        self.first_row..self.first_row + count
    }

    /// True if the block covers no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over `(global_row, row)` pairs.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut [T])> + '_ {
        let first_row = self.first_row;
        self.data
            .chunks_exact_mut(self.cols.max(1))
            .enumerate()
            .map(move |(offset, row)| (first_row + offset, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Matrix::new(2, 3, vec![1, 2, 3, 4, 5]).unwrap_err();
        assert!(matches!(
            err,
            KernelError::DimensionMismatch {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_new_rejects_overflowing_shape() {
        // Wraps to zero elements without a checked multiply.
        let err = Matrix::<i32>::new(1 << 33, 1 << 31, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            KernelError::ShapeOverflow {
                rows: 8_589_934_592,
                cols: 2_147_483_648
            }
        ));
        let err = Matrix::<i32>::new(usize::MAX, 2, Vec::new()).unwrap_err();
        assert!(matches!(err, KernelError::ShapeOverflow { .. }));
    }

    #[test]
    #[should_panic(expected = "overflows the addressable element count")]
    fn test_zeros_overflowing_shape_panics() {
        let _ = Matrix::<i64>::zeros(usize::MAX, 2);
    }

    #[test]
    fn test_row_major_indexing() {
        let m = Matrix::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(m[(0, 0)], 1);
        assert_eq!(m[(0, 2)], 3);
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(m[(1, 2)], 6);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds for 2x3 matrix")]
    fn test_column_overflow_panics() {
        // (0, 3) maps to linear index 3, which exists in the buffer but is
        // outside the shape.
        let m = Matrix::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let _ = m[(0, 3)];
    }

    #[test]
    fn test_index_mut() {
        let mut m: Matrix<i64> = Matrix::zeros(2, 2);
        m[(1, 0)] = 7;
        assert_eq!(m.as_slice(), &[0, 0, 7, 0]);
    }

    #[test]
    fn test_row_blocks_are_disjoint() {
        let mut m: Matrix<i32> = Matrix::zeros(5, 2);
        let ranges = [
            WorkRange::new(0, 2),
            WorkRange::new(2, 2),
            WorkRange::new(2, 5),
        ];
        let mut blocks = m.row_blocks_mut(ranges);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].rows(), 0..2);
        assert!(blocks[1].is_empty());
        assert_eq!(blocks[2].rows(), 2..5);

        for block in &mut blocks {
            for (i, row) in block.rows_mut() {
                row.fill(i as i32);
            }
        }
        assert_eq!(m.as_slice(), &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    #[should_panic(expected = "does not start where the previous one ended")]
    fn test_row_blocks_reject_gap() {
        let mut m: Matrix<i32> = Matrix::zeros(4, 1);
        let _ = m.row_blocks_mut([WorkRange::new(0, 1), WorkRange::new(2, 4)]);
    }

    #[test]
    fn test_display_small() {
        let m = Matrix::from_rows(&[[1, 2], [3, 4]]);
        let text = m.to_string();
        assert!(text.starts_with("2x2 matrix:\n"));
        assert!(text.contains("|     1    2 |"));
    }

    #[test]
    fn test_display_elides_wide_rows() {
        let m = Matrix::new(1, 30, (0..30).collect()).unwrap();
        let text = m.to_string();
        assert!(text.contains(" ... "));
        assert!(text.contains("   14"));
        assert!(!text.contains("   15 "));
        assert!(text.contains("   29 |"));
    }
}
