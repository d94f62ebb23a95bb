//! Best-so-far planar edge set.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use planar_common::Edge;

/// Storage for the incumbent. The size never decreases.
pub(crate) trait Incumbent {
    /// Size of the best edge set so far.
    fn size(&self) -> usize;

    /// Replaces the incumbent with `candidate` if it is strictly larger.
    /// Returns whether it did.
    fn offer(&mut self, candidate: &[Edge]) -> bool;
}

impl Incumbent for Vec<Edge> {
    fn size(&self) -> usize {
        self.len()
    }

    fn offer(&mut self, candidate: &[Edge]) -> bool {
        if candidate.len() > self.len() {
            self.clear();
            self.extend_from_slice(candidate);
            true
        } else {
            false
        }
    }
}

/// Incumbent shared between workers.
///
/// Updates compare-and-replace by size under a mutex. Pruning reads go through
/// an atomic snapshot that may lag behind the mutex, which only costs extra
/// exploration.
#[derive(Debug)]
pub(crate) struct SharedIncumbent {
    best: Mutex<Vec<Edge>>,
    size: AtomicUsize,
}

impl SharedIncumbent {
    pub(crate) fn new(initial: Vec<Edge>) -> Self {
        Self {
            size: AtomicUsize::new(initial.len()),
            best: Mutex::new(initial),
        }
    }

    pub(crate) fn into_inner(self) -> Vec<Edge> {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Incumbent for &SharedIncumbent {
    fn size(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    fn offer(&mut self, candidate: &[Edge]) -> bool {
        if candidate.len() <= self.size() {
            return false;
        }
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        best.offer(candidate) && {
            self.size.store(best.len(), Ordering::Release);
            true
        }
    }
}
