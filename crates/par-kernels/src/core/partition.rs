//! Range partitioner.

use crate::types::WorkRange;

/// Split `[0, total)` into `workers` contiguous ranges.
///
/// Every worker gets `total / workers` units and the first
/// `total % workers` workers get one more, so sizes differ by at most one.
/// Ranges come out in increasing order and each starts where the previous
/// one ended. When `workers > total` the trailing ranges are empty.
///
/// # Panics
///
/// Panics if `workers == 0`.
///
/// # Example
///
/// ```rust
/// use par_kernels::core::partition;
///
/// let sizes: Vec<usize> = partition(10, 4).map(|r| r.len()).collect();
/// assert_eq!(sizes, vec![3, 3, 2, 2]);
/// ```
pub fn partition(total: usize, workers: usize) -> Partition {
    assert!(workers >= 1, "partition requires at least one worker");
    Partition {
        base: total / workers,
        remainder: total % workers,
        workers,
        index: 0,
        next_start: 0,
    }
}

/// Iterator over the ranges produced by [`partition`].
#[derive(Debug, Clone)]
pub struct Partition {
    base: usize,
    remainder: usize,
    workers: usize,
    index: usize,
    next_start: usize,
}

impl Iterator for Partition {
    type Item = WorkRange;

    fn next(&mut self) -> Option<WorkRange> {
        if self.index >= self.workers {
            return None;
        }
        let len = self.base + usize::from(self.index < self.remainder);
        let range = WorkRange::new(self.next_start, self.next_start + len);
        self.next_start = range.end;
        self.index += 1;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.workers - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Partition {}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_cover(total: usize, workers: usize) {
        let ranges: Vec<_> = partition(total, workers).collect();
        assert_eq!(ranges.len(), workers);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[workers - 1].end, total);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let min = ranges.iter().map(WorkRange::len).min().unwrap();
        let max = ranges.iter().map(WorkRange::len).max().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_even_split() {
        let ranges: Vec<_> = partition(12, 3).collect();
        assert_eq!(
            ranges,
            vec![
                WorkRange::new(0, 4),
                WorkRange::new(4, 8),
                WorkRange::new(8, 12)
            ]
        );
    }

    #[test]
    fn test_remainder_goes_to_first_workers() {
        let ranges: Vec<_> = partition(7, 3).collect();
        assert_eq!(
            ranges,
            vec![
                WorkRange::new(0, 3),
                WorkRange::new(3, 5),
                WorkRange::new(5, 7)
            ]
        );
    }

    #[test]
    fn test_more_workers_than_units() {
        let ranges: Vec<_> = partition(2, 5).collect();
        assert_eq!(ranges.len(), 5);
        assert_eq!(ranges[0], WorkRange::new(0, 1));
        assert_eq!(ranges[1], WorkRange::new(1, 2));
        assert!(ranges[2..].iter().all(WorkRange::is_empty));
        assert!(ranges[2..].iter().all(|r| r.start == 2));
    }

    #[test]
    fn test_zero_total() {
        let ranges: Vec<_> = partition(0, 3).collect();
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(WorkRange::is_empty));
    }

    #[test]
    fn test_cover_grid() {
        for total in 0..40 {
            for workers in 1..12 {
                check_cover(total, workers);
            }
        }
    }

    #[test]
    fn test_exact_size() {
        let mut p = partition(10, 4);
        assert_eq!(p.len(), 4);
        p.next();
        assert_eq!(p.len(), 3);
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_zero_workers_panics() {
        let _ = partition(10, 0);
    }
}
