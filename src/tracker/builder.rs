//! Builder for constructing a [`Tracker`] with optional wiring.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::events::Bus;
use crate::liveness::{AlwaysActive, Liveness};
use crate::sequence::CallSequencer;
use crate::state::{AsyncState, StateStore};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::tracker::operation::OpRef;
use crate::tracker::wrapper::Tracker;

/// Default event bus capacity.
const DEFAULT_BUS_CAPACITY: usize = 64;

/// Builder for a [`Tracker`] with custom initial state, liveness,
/// subscribers, and bus capacity.
///
/// The builder doubles as the reconstruction factory: when the operation's
/// definition changes, build a fresh tracker (reset sequencer, fresh state)
/// and discard the old one. See also [`Tracker::rebuilt`].
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use lastcall::{AsyncState, OpFn, ScopeToken, Tracker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let scope = ScopeToken::new();
/// let tracker = Tracker::builder(OpFn::arc("noop", |(): ()| async {
///     Ok::<u32, String>(0)
/// }))
/// .with_initial(AsyncState::settled(Ok(0)))
/// .with_liveness(Arc::new(scope.clone()))
/// .build();
///
/// assert_eq!(tracker.state().value(), Some(&0));
/// # }
/// ```
pub struct TrackerBuilder<A, T, E>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    op: OpRef<A, T, E>,
    initial: AsyncState<T, E>,
    liveness: Arc<dyn Liveness>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    bus_capacity: usize,
}

impl<A, T, E> TrackerBuilder<A, T, E>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates a builder with defaults: initial `Loading` state, no
    /// subscribers, a liveness that never expires.
    pub fn new(op: OpRef<A, T, E>) -> Self {
        Self {
            op,
            initial: AsyncState::loading(),
            liveness: Arc::new(AlwaysActive),
            subscribers: Vec::new(),
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }

    /// Sets the initial observable state (default: `Loading` with no stale data).
    pub fn with_initial(mut self, initial: AsyncState<T, E>) -> Self {
        self.initial = initial;
        self
    }

    /// Injects the consumer-liveness capability (default: [`AlwaysActive`]).
    pub fn with_liveness(mut self, liveness: Arc<dyn Liveness>) -> Self {
        self.liveness = liveness;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive tracking events (issued, accepted, discarded)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the event bus capacity (default 64; clamped to ≥ 1 by the bus).
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }

    /// Builds and returns the tracker.
    ///
    /// When subscribers were set, this spawns a listener task bridging the
    /// bus to the [`SubscriberSet`]; it therefore must run inside a tokio
    /// runtime in that case. The listener (and the subscriber workers) wind
    /// down once every bus publisher — the tracker and its rebuilds — has
    /// been dropped.
    pub fn build(self) -> Tracker<A, T, E> {
        let bus = Bus::new(self.bus_capacity);

        if !self.subscribers.is_empty() {
            let set = SubscriberSet::new(self.subscribers);
            let mut rx = bus.subscribe();
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
                set.shutdown().await;
            });
        }

        Tracker {
            op: self.op,
            sequencer: CallSequencer::new(),
            store: StateStore::new(self.initial),
            liveness: self.liveness,
            bus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::tracker::operation::OpFn;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::task::yield_now;

    fn noop() -> OpRef<u32, u32, &'static str> {
        OpFn::arc("noop", |x: u32| async move { Ok(x) })
    }

    #[tokio::test]
    async fn test_initial_state_is_configurable() {
        let tracker = TrackerBuilder::new(noop())
            .with_initial(AsyncState::settled(Ok(99)))
            .build();
        assert_eq!(tracker.state().value(), Some(&99));
    }

    struct Counter {
        seen: AtomicUsize,
    }

    #[async_trait]
    impl Subscribe for Counter {
        async fn on_event(&self, _event: &Event) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[tokio::test]
    async fn test_subscribers_receive_tracking_events() {
        let counter = Arc::new(Counter {
            seen: AtomicUsize::new(0),
        });
        let tracker = TrackerBuilder::new(noop())
            .with_subscribers(vec![counter.clone() as _])
            .build();

        tracker.invoke(1).await.unwrap();

        // Let the listener and the subscriber worker drain.
        for _ in 0..8 {
            yield_now().await;
        }
        // One CallIssued + one SettleAccepted.
        assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
    }
}
