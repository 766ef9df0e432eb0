//! # lastcall
//!
//! **Lastcall** is a latest-wins state tracker for repeatedly-invoked async
//! operations.
//!
//! It wraps one async operation and exposes a single consistent view of its
//! most recent result. When invocations overlap, a settlement from a
//! superseded call never overwrites state derived from a newer call, and
//! nothing is written after the consuming scope has been torn down — while
//! every caller still receives the real outcome of its own call.
//!
//! ## Architecture
//! ```text
//!            invoke(args)                         handle() / state()
//!                 │                                      ▲
//!                 ▼                                      │
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Tracker (invocation wrapper)                                       │
//! │  - CallSequencer (monotonic call ids, staleness check)              │
//! │  - StateStore (watch-backed AsyncState<T, E>)                       │
//! │  - Liveness (injected: ScopeToken / AlwaysActive / custom)          │
//! │  - Bus (broadcast tracking events)                                  │
//! └───────┬──────────────────────────────────────────────────┬──────────┘
//!         │ dispatch                                         │ publish
//!         ▼                                                  ▼
//!   Operation (OpFn / custom)                     Bus ──► listener ──► SubscriberSet
//!         │                                                  ┌─────────┼─────────┐
//!         │ settle (any order)                               ▼         ▼         ▼
//!         ▼                                               worker1   worker2   workerN
//!   gate: liveness.is_active() && is_current(call)           ▼         ▼         ▼
//!         │                                              sub1.on   sub2.on   subN.on
//!         ├─ pass ─► StateStore.write ─► watchers woken    _event()  _event()  _event()
//!         └─ fail ─► dropped (state untouched)
//! ```
//!
//! ### Per-invocation lifecycle
//! ```text
//! Issued ──► Settling ──► Accepted   (gate passed; state written)
//!                    └──► Discarded  (superseded or scope retired; terminal)
//! ```
//!
//! ## Features
//! | Area           | Description                                                   | Key types / traits                  |
//! |----------------|---------------------------------------------------------------|-------------------------------------|
//! | **State**      | Observable `Loading`/`Value`/`Error` union with stale data.   | [`AsyncState`], [`StateHandle`]     |
//! | **Sequencing** | Strictly increasing call ids, staleness gating.               | [`CallSequencer`]                   |
//! | **Liveness**   | Injected "is the consumer still active?" capability.          | [`Liveness`], [`ScopeToken`]        |
//! | **Operations** | The wrapped async operation as a trait seam.                  | [`Operation`], [`OpFn`], [`OpRef`]  |
//! | **Tracking**   | The invocation wrapper and its builder.                       | [`Tracker`], [`TrackerBuilder`]     |
//! | **Events**     | Broadcast trace of issue/accept/discard decisions.            | [`Event`], [`EventKind`], [`Bus`]   |
//! | **Subscribers**| Hook into tracking events (logging, metrics, custom).         | [`Subscribe`]                       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use lastcall::{OpFn, Tracker};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let tracker = Tracker::new(OpFn::arc("fetch", |user_id: u64| async move {
//!         // pretend network call...
//!         Ok::<String, String>(format!("user-{user_id}"))
//!     }));
//!
//!     // The returned outcome and the observable state agree for the
//!     // most recent call:
//!     let out = tracker.invoke(7).await;
//!     assert_eq!(out.as_deref(), Ok("user-7"));
//!     assert_eq!(tracker.state().value().map(String::as_str), Some("user-7"));
//! }
//! ```

mod events;
mod liveness;
mod sequence;
mod state;
mod subscribers;
mod tracker;

// ---- Public re-exports ----

pub use events::{Bus, DiscardReason, Event, EventKind};
pub use liveness::{AlwaysActive, Liveness, ScopeToken};
pub use sequence::CallSequencer;
pub use state::{AsyncState, StateHandle, StateStore};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tracker::{BoxSettleFuture, OpFn, OpRef, Operation, Tracker, TrackerBuilder};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
