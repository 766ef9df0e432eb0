//! Tracking events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the tracker around each call.
//!
//! ## Contents
//! - [`EventKind`], [`DiscardReason`], [`Event`] — event classification and
//!   payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`

mod bus;
mod event;

pub use bus::Bus;
pub use event::{DiscardReason, Event, EventKind};
