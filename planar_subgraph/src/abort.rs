//! Cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Clonable handle that asks a running search to stop at its next branch point.
///
/// The search then returns its incumbent with
/// [`SearchStatus::BestEffortTimedOut`](crate::SearchStatus::BestEffortTimedOut).
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// A handle that has not fired.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the search to stop. Idempotent.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`AbortHandle::abort`] has been called on any clone.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Abort handle plus deadline, polled at branch points.
#[derive(Clone, Debug)]
pub(crate) struct StopCondition {
    abort: AbortHandle,
    deadline: Option<Instant>,
}

impl StopCondition {
    pub(crate) const fn new(abort: AbortHandle, deadline: Option<Instant>) -> Self {
        Self { abort, deadline }
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.abort.is_aborted() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
