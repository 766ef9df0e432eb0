//! Subscriber API: hook into tracking events.
//!
//! ## Contents
//! - [`Subscribe`] — the extension-point trait (async `on_event`).
//! - [`SubscriberSet`] — fan-out with per-subscriber bounded queues and
//!   worker tasks; used internally by the tracker builder.
//! - [`LogWriter`] — simple stdout subscriber (`logging` feature).

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
