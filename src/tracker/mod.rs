//! Invocation tracking: the operation seam and the wrapper around it.
//!
//! ## Contents
//! - [`operation`]: the [`Operation`] trait, function-backed [`OpFn`], and
//!   the shared [`OpRef`] handle;
//! - [`wrapper`]: the [`Tracker`] invocation wrapper (sequencing, gating,
//!   settlement reconciliation);
//! - [`builder`]: [`TrackerBuilder`] construction and subscriber wiring.

mod builder;
mod operation;
mod wrapper;

pub use builder::TrackerBuilder;
pub use operation::{BoxSettleFuture, OpFn, OpRef, Operation};
pub use wrapper::Tracker;
