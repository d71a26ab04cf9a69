use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared by the workers of one kernel call.
///
/// Workers poll [`is_cancelled`](Self::is_cancelled) at safe points (between
/// rows or element strides) and return early once it is set. Workers hold no
/// locks and write only memory they own, so stopping at any safe point
/// leaves nothing inconsistent beyond the discarded output.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that every worker observing this token stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
