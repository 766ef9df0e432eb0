//! # Shared state cell with change notification.
//!
//! [`StateStore`] is a thin wrapper over [`tokio::sync::watch`] holding the
//! current [`AsyncState`]. The watch channel gives us exactly the contract
//! the tracker needs: a single always-readable latest value, and wakeups for
//! consumers awaiting a change.
//!
//! ## Rules
//! - `write` replaces the stored state **unconditionally**. Gating (liveness,
//!   staleness) is the caller's job; the store holds no gating policy of its
//!   own.
//! - The channel's internal lock doubles as the serialization point for the
//!   tracker: `mark_loading_with` runs the caller's issue step and
//!   `write_if` evaluates the caller's gate **inside** that lock, so an
//!   issue (marker bump + loading transition) and a gated settlement write
//!   can never interleave halfway.
//! - Handles created by `handle()` observe every subsequent write.

use tokio::sync::watch;

use crate::state::AsyncState;

/// Write side of the observable state.
///
/// Owned by the tracker; external components never write it directly.
#[derive(Debug)]
pub struct StateStore<T, E> {
    tx: watch::Sender<AsyncState<T, E>>,
}

impl<T, E> StateStore<T, E> {
    /// Creates a store holding `initial`.
    pub fn new(initial: AsyncState<T, E>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replaces the stored state and notifies all handles.
    pub fn write(&self, state: AsyncState<T, E>) {
        self.tx.send_replace(state);
    }

    /// Applies the soft loading transition to the stored state.
    ///
    /// The previous settled payload survives as stale data; see
    /// [`AsyncState::into_loading`].
    pub fn mark_loading(&self) {
        self.mark_loading_with(|| ());
    }

    /// Runs `issue` and then the soft loading transition as one step.
    ///
    /// Both happen inside the channel's critical section, so a concurrent
    /// [`StateStore::write_if`] observes either none or both of them. The
    /// tracker uses this to bump the call marker and go loading atomically.
    pub fn mark_loading_with<R>(&self, issue: impl FnOnce() -> R) -> R {
        let mut out = None;
        self.tx.send_modify(|state| {
            out = Some(issue());
            let prev = std::mem::take(state);
            *state = prev.into_loading();
        });
        // send_modify runs its closure exactly once.
        out.expect("issue closure ran")
    }

    /// Replaces the stored state with `state()` iff `gate()` holds.
    ///
    /// The gate is evaluated inside the channel's critical section, after any
    /// in-progress [`StateStore::mark_loading_with`] has completed and before
    /// any later one starts. `state` is only built (and handles only woken)
    /// when the gate passes. Returns whether the write happened.
    pub fn write_if(
        &self,
        gate: impl FnOnce() -> bool,
        state: impl FnOnce() -> AsyncState<T, E>,
    ) -> bool {
        self.tx.send_if_modified(|current| {
            if gate() {
                *current = state();
                true
            } else {
                false
            }
        })
    }

    /// Creates a read handle observing subsequent writes.
    pub fn handle(&self) -> StateHandle<T, E> {
        StateHandle {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T, E> StateStore<T, E>
where
    T: Clone,
    E: Clone,
{
    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> AsyncState<T, E> {
        self.tx.borrow().clone()
    }
}

/// Read side of the observable state, handed to consumers.
///
/// Cheap to clone; each clone tracks change notifications independently.
///
/// # Example
/// ```no_run
/// # async fn demo(mut handle: lastcall::StateHandle<u32, String>) {
/// while handle.changed().await.is_ok() {
///     let state = handle.snapshot();
///     if !state.is_loading() {
///         break;
///     }
/// }
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StateHandle<T, E> {
    rx: watch::Receiver<AsyncState<T, E>>,
}

impl<T, E> StateHandle<T, E> {
    /// Waits until the state is written again.
    ///
    /// Returns `Err` once the owning tracker (the write side) is dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

impl<T, E> StateHandle<T, E>
where
    T: Clone,
    E: Clone,
{
    /// Returns a clone of the current state.
    pub fn snapshot(&self) -> AsyncState<T, E> {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Store = StateStore<u32, &'static str>;

    #[test]
    fn test_initial_value_is_visible() {
        let store = Store::new(AsyncState::settled(Ok(5)));
        assert_eq!(store.snapshot().value(), Some(&5));
    }

    #[test]
    fn test_write_replaces_unconditionally() {
        let store = Store::new(AsyncState::loading());
        store.write(AsyncState::settled(Ok(1)));
        store.write(AsyncState::settled(Err("boom")));
        assert!(store.snapshot().is_error());
    }

    #[test]
    fn test_mark_loading_keeps_stale_payload() {
        let store = Store::new(AsyncState::settled(Ok(9)));
        store.mark_loading();
        let state = store.snapshot();
        assert!(state.is_loading());
        assert_eq!(state.latest_value(), Some(&9));
    }

    #[test]
    fn test_write_if_applies_only_when_gate_holds() {
        let store = Store::new(AsyncState::loading());
        let mut handle = store.handle();

        assert!(!store.write_if(|| false, || AsyncState::settled(Ok(1))));
        assert!(store.snapshot().is_loading());

        assert!(store.write_if(|| true, || AsyncState::settled(Ok(2))));
        assert_eq!(store.snapshot().value(), Some(&2));

        // A rejected write must not wake watchers either: the only pending
        // change is the accepted one.
        assert!(handle.rx.has_changed().unwrap());
        handle.rx.borrow_and_update();
        assert!(!store.write_if(|| false, || AsyncState::settled(Ok(3))));
        assert!(!handle.rx.has_changed().unwrap());
    }

    #[test]
    fn test_issue_and_gated_write_serialize_on_the_store() {
        // Replays the superseded-settlement interleaving: call 1 is issued,
        // call 2 is issued on top of it, then call 1's settlement must be
        // rejected by the same gate that call 2's settlement passes.
        let seq = crate::sequence::CallSequencer::new();
        let store = Store::new(AsyncState::loading());

        let first = store.mark_loading_with(|| seq.next());
        let second = store.mark_loading_with(|| seq.next());

        assert!(!store.write_if(|| seq.is_current(first), || AsyncState::settled(Ok(10))));
        assert!(store.snapshot().is_loading());

        assert!(store.write_if(|| seq.is_current(second), || AsyncState::settled(Ok(20))));
        assert_eq!(store.snapshot().value(), Some(&20));
    }

    #[tokio::test]
    async fn test_handle_observes_writes() {
        let store = Store::new(AsyncState::loading());
        let mut handle = store.handle();

        store.write(AsyncState::settled(Ok(3)));
        handle.changed().await.unwrap();
        assert_eq!(handle.snapshot().value(), Some(&3));
    }

    #[tokio::test]
    async fn test_handle_errors_after_store_drop() {
        let store = Store::new(AsyncState::loading());
        let mut handle = store.handle();
        drop(store);
        assert!(handle.changed().await.is_err());
    }
}
