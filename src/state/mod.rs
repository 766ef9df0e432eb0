//! Observable async state: the data model and its store.
//!
//! ## Contents
//! - [`AsyncState`] — the tagged union (`Loading` / `Value` / `Error`) plus
//!   predicates and the soft loading transition.
//! - [`StateStore`] / [`StateHandle`] — write and read sides of the shared
//!   state, backed by a `tokio::sync::watch` channel so every write is
//!   observable by consumers.

mod async_state;
mod store;

pub use async_state::AsyncState;
pub use store::{StateHandle, StateStore};
