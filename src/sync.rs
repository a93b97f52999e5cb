//! A cheaply-cloneable stop flag shared across search workers. Used both for
//! `stop_search` (time/node limit reached, abort the whole iterative
//! deepening run) and `cutoff` (a parallel fork point found a move that beat
//! beta and the remaining siblings can be skipped).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn as_arc(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        StopFlag::new()
    }
}

impl From<Arc<AtomicBool>> for StopFlag {
    fn from(flag: Arc<AtomicBool>) -> Self {
        StopFlag(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());
    }

    #[test]
    fn stop_is_visible_through_clones() {
        let flag = StopFlag::new();
        let clone = flag.clone();
        clone.stop();
        assert!(flag.is_stopped());
    }

    #[test]
    fn reset_clears_the_flag() {
        let flag = StopFlag::new();
        flag.stop();
        flag.reset();
        assert!(!flag.is_stopped());
    }
}
