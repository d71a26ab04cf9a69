use std::fmt;
use std::ops::Range;

/// A half-open interval `[start, end)` of indices owned by one worker.
///
/// Depending on the kernel this is either a span of vector elements or a
/// span of destination matrix rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WorkRange {
    /// First index in the range.
    pub start: usize,
    /// One past the last index in the range.
    pub end: usize,
}

impl WorkRange {
    /// Create a range. `start` must not exceed `end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} exceeds end {end}");
        Self { start, end }
    }

    /// Number of indices in the range.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the zero-length ranges handed out when workers outnumber units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The range as a `std::ops::Range`, for slicing.
    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<WorkRange> for Range<usize> {
    fn from(range: WorkRange) -> Self {
        range.as_range()
    }
}

impl fmt::Display for WorkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_empty() {
        let r = WorkRange::new(3, 7);
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
        assert!(WorkRange::new(5, 5).is_empty());
    }

    #[test]
    fn test_slicing_with_range() {
        let data = [10, 20, 30, 40, 50];
        let r = WorkRange::new(1, 4);
        assert_eq!(&data[r.as_range()], &[20, 30, 40]);
        assert_eq!(r.to_string(), "[1, 4)");
    }
}
