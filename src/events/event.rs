//! # Tracking events emitted around each invocation.
//!
//! The [`EventKind`] enum classifies what happened to a call:
//! - [`EventKind::CallIssued`] — a call was issued and the state went loading.
//! - [`EventKind::SettleAccepted`] — a settlement passed the gate and was
//!   written to the state store.
//! - [`EventKind::SettleDiscarded`] — a settlement failed the gate; the
//!   attached [`DiscardReason`] says why.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use lastcall::{DiscardReason, Event, EventKind};
//!
//! let ev = Event::new(EventKind::SettleDiscarded)
//!     .with_op("fetch-user")
//!     .with_call(3)
//!     .with_discard(DiscardReason::Superseded);
//!
//! assert_eq!(ev.kind, EventKind::SettleDiscarded);
//! assert_eq!(ev.call, Some(3));
//! assert_eq!(ev.discard, Some(DiscardReason::Superseded));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of tracking events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A call was issued; the state store took the soft loading transition.
    ///
    /// Sets:
    /// - `op`: operation name
    /// - `call`: call id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    CallIssued,

    /// A settlement passed the liveness/staleness gate and was written.
    ///
    /// Sets:
    /// - `op`: operation name
    /// - `call`: call id
    /// - `failed`: whether the settlement was a failure
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SettleAccepted,

    /// A settlement failed the gate; no state was written.
    ///
    /// Sets:
    /// - `op`: operation name
    /// - `call`: call id
    /// - `failed`: whether the settlement was a failure
    /// - `discard`: why the settlement was dropped
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SettleDiscarded,
}

/// Why a settlement was dropped at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer call was issued while this one was settling.
    Superseded,
    /// The consumer scope was retired before this call settled.
    Inactive,
}

/// Tracking event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the operation, if attached.
    pub op: Option<Arc<str>>,
    /// Call id within the owning tracker.
    pub call: Option<u64>,
    /// Whether the settlement was a failure (settle events only).
    pub failed: Option<bool>,
    /// Why the settlement was dropped (discard events only).
    pub discard: Option<DiscardReason>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            op: None,
            call: None,
            failed: None,
            discard: None,
        }
    }

    /// Attaches the operation name.
    #[inline]
    pub fn with_op(mut self, op: impl Into<Arc<str>>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Attaches the call id.
    #[inline]
    pub fn with_call(mut self, call: u64) -> Self {
        self.call = Some(call);
        self
    }

    /// Marks whether the settlement failed.
    #[inline]
    pub fn with_failed(mut self, failed: bool) -> Self {
        self.failed = Some(failed);
        self
    }

    /// Attaches the discard reason.
    #[inline]
    pub fn with_discard(mut self, reason: DiscardReason) -> Self {
        self.discard = Some(reason);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::CallIssued);
        let b = Event::new(EventKind::CallIssued);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::new(EventKind::SettleAccepted)
            .with_op("op")
            .with_call(7)
            .with_failed(false);
        assert_eq!(ev.op.as_deref(), Some("op"));
        assert_eq!(ev.call, Some(7));
        assert_eq!(ev.failed, Some(false));
        assert_eq!(ev.discard, None);
    }
}
