//! Seeded fixture generation.
//!
//! Inputs for tests, benchmarks and the CLI are drawn from an explicitly
//! seeded [`StdRng`] owned by a [`Generator`]; nothing touches process-wide
//! random state, so the same seed always reproduces the same data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{KernelError, Result};
use crate::types::matrix::element_count;
use crate::types::{Element, Matrix};

/// Source of uniformly distributed integer vectors and matrices.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `n` values drawn uniformly from `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidRange`] if `min > max`.
    pub fn vector(&mut self, n: usize, min: Element, max: Element) -> Result<Vec<Element>> {
        if min > max {
            return Err(KernelError::InvalidRange { min, max });
        }
        Ok((0..n).map(|_| self.rng.gen_range(min..=max)).collect())
    }

    /// A `rows x cols` matrix with entries drawn uniformly from `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidRange`] if `min > max`, or
    /// [`KernelError::ShapeOverflow`] if `rows * cols` overflows `usize`.
    pub fn matrix(
        &mut self,
        rows: usize,
        cols: usize,
        min: Element,
        max: Element,
    ) -> Result<Matrix> {
        let data = self.vector(element_count(rows, cols)?, min, max)?;
        Matrix::new(rows, cols, data)
    }
}
