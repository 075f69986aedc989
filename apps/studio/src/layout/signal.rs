//! The explicit layout-dirty signal.
//!
//! Replaces platform mutation observation: whoever changes the document,
//! variant, or edit mode marks the signal, and the render cycle consumes it
//! exactly once. A burst of rapid edits therefore triggers one recomputation
//! per visible render, not one per change — required to keep the pagination
//! from flickering.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct LayoutSignal {
    dirty: AtomicBool,
    /// Total times the signal has been consumed; used to verify coalescing.
    generations: AtomicU64,
}

impl LayoutSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the layout dirty. Idempotent within a render cycle.
    pub fn mark(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Consumes the dirty flag. Returns true at most once per burst of marks.
    pub fn take(&self) -> bool {
        let was_dirty = self.dirty.swap(false, Ordering::AcqRel);
        if was_dirty {
            self.generations.fetch_add(1, Ordering::Relaxed);
        }
        was_dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// How many recomputation passes this signal has triggered.
    pub fn generation(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_of_marks_coalesces_to_one_take() {
        let signal = LayoutSignal::new();
        for _ in 0..50 {
            signal.mark();
        }
        assert!(signal.take(), "first take after a burst fires");
        assert!(!signal.take(), "second take is a no-op");
        assert_eq!(signal.generation(), 1);
    }

    #[test]
    fn test_clean_signal_does_not_fire() {
        let signal = LayoutSignal::new();
        assert!(!signal.take());
        assert_eq!(signal.generation(), 0);
    }

    #[test]
    fn test_mark_after_take_fires_again() {
        let signal = LayoutSignal::new();
        signal.mark();
        assert!(signal.take());
        signal.mark();
        assert!(signal.is_dirty());
        assert!(signal.take());
        assert_eq!(signal.generation(), 2);
    }
}
