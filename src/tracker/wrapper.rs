//! # Tracker: sequences invocations and reconciles their settlements.
//!
//! The [`Tracker`] owns the call sequencer, the state store, a shared
//! [`Liveness`] capability, and the event bus. Its [`invoke`](Tracker::invoke)
//! method is the public entry point for the wrapped operation.
//!
//! ## Invocation flow
//! ```text
//! invoke(args)
//!   ├─► issue: call = sequencer.next()     ┐ one critical section on the
//!   │          store goes loading (soft)   ┘ store (synchronous, pre-await)
//!   ├─► publish CallIssued
//!   ├─► outcome = op.dispatch(args).await  (suspension point)
//!   │
//!   ├─► gate: liveness.is_active() && sequencer.is_current(call)
//!   │     ├─ pass ─► store write (settled) ─► publish SettleAccepted
//!   │     └─ fail ─► (no state write)      ─► publish SettleDiscarded
//!   │
//!   └─► return outcome                     (caller always sees the real result)
//! ```
//!
//! ## Rules
//! - The loading transition is **not** gated: it runs synchronously on the
//!   calling invocation's own turn and cannot be stale relative to itself.
//! - Settlement writes are gated: they arrive asynchronously, possibly out of
//!   order relative to a newer call's settlement. Only the settlement whose
//!   call id still matches the sequencer marker writes; everything else is
//!   dropped regardless of arrival order.
//! - The issue step (marker bump + loading transition) and the gated
//!   settlement write each run inside the store's critical section, so the
//!   gate cannot pass for a call that another worker has already superseded
//!   mid-write. This holds on the multi-thread runtime, not just
//!   current-thread.
//! - A discarded settlement is terminal. It never retries or re-settles, and
//!   its outcome is still returned to the caller.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::events::{Bus, DiscardReason, Event, EventKind};
use crate::liveness::Liveness;
use crate::sequence::CallSequencer;
use crate::state::{AsyncState, StateHandle, StateStore};
use crate::tracker::builder::TrackerBuilder;
use crate::tracker::operation::OpRef;

/// Latest-wins invocation wrapper around one async operation.
///
/// The consumer-facing surface is the pair of [`Tracker::handle`] (the live,
/// continuously updated state) and [`Tracker::invoke`]. An arbitrary number
/// of invocations may be in flight concurrently; the shared state only ever
/// reflects the most recently issued one.
///
/// # Example
/// ```
/// use lastcall::{OpFn, Tracker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = Tracker::new(OpFn::arc("double", |x: u32| async move {
///     Ok::<u32, String>(x * 2)
/// }));
///
/// assert!(tracker.state().is_loading());
/// let out = tracker.invoke(21).await;
/// assert_eq!(out, Ok(42));
/// assert_eq!(tracker.state().value(), Some(&42));
/// # }
/// ```
pub struct Tracker<A, T, E>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub(super) op: OpRef<A, T, E>,
    pub(super) sequencer: CallSequencer,
    pub(super) store: StateStore<T, E>,
    pub(super) liveness: Arc<dyn Liveness>,
    pub(super) bus: Bus,
}

impl<A, T, E> Tracker<A, T, E>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a tracker with defaults: initial `Loading` state, no
    /// subscribers, a liveness that never expires.
    pub fn new(op: OpRef<A, T, E>) -> Self {
        TrackerBuilder::new(op).build()
    }

    /// Returns a builder for a tracker with custom wiring.
    pub fn builder(op: OpRef<A, T, E>) -> TrackerBuilder<A, T, E> {
        TrackerBuilder::new(op)
    }

    /// Invokes the wrapped operation once and tracks its settlement.
    ///
    /// Returns the operation's own outcome, unmodified, so callers can await
    /// or chain it independent of state tracking. Even when the settlement is
    /// discarded at the gate, the real result (or error) is delivered here —
    /// only the shared observable state is shielded from stale data.
    pub async fn invoke(&self, args: A) -> Result<T, E> {
        // Marker bump and loading transition are one step on the store, so a
        // settlement racing on another worker sees either neither or both.
        let call = self.store.mark_loading_with(|| self.sequencer.next());
        self.bus.publish(
            Event::new(EventKind::CallIssued)
                .with_op(self.op.name().to_owned())
                .with_call(call),
        );

        let outcome = self.op.dispatch(args).await;

        let mut active = true;
        let accepted = self.store.write_if(
            || {
                active = self.liveness.is_active();
                active && self.sequencer.is_current(call)
            },
            || AsyncState::settled(outcome.clone()),
        );
        if accepted {
            self.bus.publish(
                Event::new(EventKind::SettleAccepted)
                    .with_op(self.op.name().to_owned())
                    .with_call(call)
                    .with_failed(outcome.is_err()),
            );
        } else {
            let reason = if active {
                DiscardReason::Superseded
            } else {
                DiscardReason::Inactive
            };
            self.bus.publish(
                Event::new(EventKind::SettleDiscarded)
                    .with_op(self.op.name().to_owned())
                    .with_call(call)
                    .with_failed(outcome.is_err())
                    .with_discard(reason),
            );
        }

        outcome
    }

    /// Returns a clone of the current state.
    pub fn state(&self) -> AsyncState<T, E> {
        self.store.snapshot()
    }

    /// Returns a read handle on the live state (see [`StateHandle`]).
    pub fn handle(&self) -> StateHandle<T, E> {
        self.store.handle()
    }

    /// Returns a receiver observing subsequent tracking events.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The wrapped operation's name.
    pub fn op_name(&self) -> &str {
        self.op.name()
    }

    /// Builds a fresh tracker around `op`, for when the operation's
    /// definition has changed.
    ///
    /// The new tracker starts with a reset sequencer and a fresh `Loading`
    /// state — no memory of prior in-flight calls — but shares this tracker's
    /// liveness and event bus, so long-lived subscribers keep receiving
    /// events. The caller decides when to discard the old tracker; calls
    /// still pending on it settle against its own (now abandoned) store.
    pub fn rebuilt(&self, op: OpRef<A, T, E>) -> Self {
        Self {
            op,
            sequencer: CallSequencer::new(),
            store: StateStore::new(AsyncState::loading()),
            liveness: Arc::clone(&self.liveness),
            bus: self.bus.clone(),
        }
    }
}
