//! # Call sequencing with a monotonic staleness marker.
//!
//! [`CallSequencer`] assigns each invocation a strictly increasing id and
//! answers, at settlement time, whether that invocation is still the most
//! recent one issued.
//!
//! ## Rules
//! - `next()` must run **before** the operation is dispatched, so ids reflect
//!   issue order even when settlements arrive out of order.
//! - The marker only increases: an id goes from current to stale exactly once
//!   and never back, which makes `is_current` safe to evaluate at any later
//!   point without extra synchronization.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Monotonic call-id source and staleness check.
///
/// One sequencer is owned per [`Tracker`](crate::Tracker) instance; ids are
/// scoped to that instance, not globally unique.
///
/// ### Properties
/// - Ids start at 1 and increase by 1 per call.
/// - `is_current(id)` is true iff no newer call has been issued since `id`.
#[derive(Debug, Default)]
pub struct CallSequencer {
    marker: AtomicU64,
}

impl CallSequencer {
    /// Creates a sequencer with no calls issued yet.
    pub fn new() -> Self {
        Self {
            marker: AtomicU64::new(0),
        }
    }

    /// Issues the next call id (strictly greater than every id issued before).
    pub fn next(&self) -> u64 {
        self.marker.fetch_add(1, AtomicOrdering::Relaxed) + 1
    }

    /// Returns true iff `id` is still the most recently issued call.
    pub fn is_current(&self, id: u64) -> bool {
        self.marker.load(AtomicOrdering::Relaxed) == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing_from_one() {
        let seq = CallSequencer::new();
        let ids: Vec<u64> = (0..5).map(|_| seq.next()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_newest_id_is_current() {
        let seq = CallSequencer::new();
        let a = seq.next();
        assert!(seq.is_current(a));
        let b = seq.next();
        assert!(seq.is_current(b));
        assert!(!seq.is_current(a));
    }

    #[test]
    fn test_stale_id_never_becomes_current_again() {
        let seq = CallSequencer::new();
        let a = seq.next();
        let _b = seq.next();
        assert!(!seq.is_current(a));
        let _c = seq.next();
        assert!(!seq.is_current(a));
    }

    #[test]
    fn test_unissued_id_is_not_current() {
        let seq = CallSequencer::new();
        assert!(!seq.is_current(1));
        seq.next();
        assert!(!seq.is_current(2));
    }
}
