//! # Operation abstraction and function-backed implementation.
//!
//! This module defines the [`Operation`] trait (the wrapped async operation)
//! and a convenient function-backed implementation [`OpFn`]. The common
//! handle type is [`OpRef`], an `Arc<dyn Operation>` suitable for sharing
//! across trackers and rebuilds.
//!
//! Each dispatch produces a **fresh** future owning its own state; there is
//! no hidden mutation between calls. If calls need shared state, capture an
//! `Arc<...>` explicitly inside the closure.

use std::borrow::Cow;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future resolving to the operation's settlement.
pub type BoxSettleFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// # Asynchronous operation under tracking.
///
/// An `Operation` has a stable [`name`](Operation::name) (for events and
/// logs) and a [`dispatch`](Operation::dispatch) method producing one
/// settlement per call. The tracker never cancels a dispatched future; it
/// runs to completion and only its *effect on state* may be discarded.
///
/// `Output` and `Error` require `Clone` because an accepted settlement is
/// both stored in the shared state and returned to the caller.
pub trait Operation: Send + Sync + 'static {
    /// Argument tuple passed through `invoke` unchanged.
    type Args: Send + 'static;
    /// Success payload.
    type Output: Clone + Send + Sync + 'static;
    /// Failure payload, opaque to the tracker.
    type Error: Clone + Send + Sync + 'static;

    /// Returns a stable, human-readable operation name.
    fn name(&self) -> &str;

    /// Starts one call and returns its pending settlement.
    fn dispatch(&self, args: Self::Args) -> BoxSettleFuture<Self::Output, Self::Error>;
}

/// Shared operation handle.
pub type OpRef<A, T, E> = Arc<dyn Operation<Args = A, Output = T, Error = E>>;

/// Function-backed operation implementation.
///
/// Wraps a closure that *creates* a new future per dispatch.
///
/// # Example
/// ```
/// use lastcall::{OpFn, Operation};
///
/// let op = OpFn::arc("double", |x: u32| async move {
///     Ok::<u32, String>(x * 2)
/// });
/// assert_eq!(op.name(), "double");
/// ```
pub struct OpFn<A, F> {
    name: Cow<'static, str>,
    f: F,
    _args: PhantomData<fn(A)>,
}

impl<A, F> OpFn<A, F> {
    /// Creates a new function-backed operation.
    ///
    /// Prefer [`OpFn::arc`] when you immediately need an [`OpRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _args: PhantomData,
        }
    }

    /// Creates the operation and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<A, F, Fut, T, E> Operation for OpFn<A, F>
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Args = A;
    type Output = T;
    type Error = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(&self, args: A) -> BoxSettleFuture<T, E> {
        Box::pin((self.f)(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_op_fn_dispatches_with_args() {
        let op = OpFn::new("add", |(a, b): (u32, u32)| async move {
            Ok::<u32, String>(a + b)
        });
        assert_eq!(op.name(), "add");
        assert_eq!(op.dispatch((2, 3)).await, Ok(5));
    }

    #[tokio::test]
    async fn test_op_ref_is_object_safe() {
        let op: OpRef<u32, u32, String> =
            OpFn::arc("id", |x: u32| async move { Ok::<u32, String>(x) });
        assert_eq!(op.dispatch(9).await, Ok(9));
    }

    // Goes through a generic bound so the associated types (Args/Output/Error)
    // must line up with the wrapped closure's signature.
    async fn settle<O: Operation>(op: &O, args: O::Args) -> Result<O::Output, O::Error> {
        op.dispatch(args).await
    }

    #[tokio::test]
    async fn test_associated_types_follow_the_closure() {
        let op = OpFn::new("halve", |x: u64| async move {
            if x % 2 == 0 {
                Ok(x / 2)
            } else {
                Err("odd")
            }
        });
        assert_eq!(settle(&op, 8).await, Ok(4));
        assert_eq!(settle(&op, 9).await, Err("odd"));
    }
}
