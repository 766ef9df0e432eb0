//! # The observable outcome of the most recent non-superseded call.
//!
//! [`AsyncState`] is a tagged union with exactly one active variant:
//! - `Loading` — a call is in flight (or none has settled yet). Carries the
//!   previous settled outcome as `stale` so consumers can keep showing the
//!   last known value while a refresh runs.
//! - `Value` — the most recent non-superseded call succeeded.
//! - `Error` — the most recent non-superseded call failed.
//!
//! ## Rules
//! - [`AsyncState::is_value`] and [`AsyncState::is_error`] are defined only
//!   for settled states and are mutually exclusive; a `Loading` state answers
//!   false to both regardless of its stale payload.
//! - [`AsyncState::into_loading`] is the *soft* transition: it keeps the
//!   settled payload around as stale data. Settlement replaces the state
//!   wholesale via [`AsyncState::settled`] — no merge.

/// Outcome view of a tracked async operation.
///
/// # Example
/// ```
/// use lastcall::AsyncState;
///
/// let state: AsyncState<u32, String> = AsyncState::settled(Ok(10));
/// assert!(state.is_value());
/// assert!(!state.is_error());
/// assert_eq!(state.value(), Some(&10));
///
/// // A refresh keeps the old value visible as stale data:
/// let refreshing = state.into_loading();
/// assert!(refreshing.is_loading());
/// assert!(!refreshing.is_value());
/// assert_eq!(refreshing.latest_value(), Some(&10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsyncState<T, E> {
    /// A call is in flight; `stale` holds the previous settled outcome, if any.
    Loading {
        /// Last settled outcome, kept for display during the refresh.
        stale: Option<Result<T, E>>,
    },
    /// The most recent completed, non-superseded call succeeded.
    Value {
        /// The success payload.
        value: T,
    },
    /// The most recent completed, non-superseded call failed.
    Error {
        /// The failure payload, opaque to this crate.
        error: E,
    },
}

impl<T, E> AsyncState<T, E> {
    /// Loading with no prior outcome. This is also the `Default`.
    pub fn loading() -> Self {
        AsyncState::Loading { stale: None }
    }

    /// Builds the settled state for an outcome: `Ok` → `Value`, `Err` → `Error`.
    pub fn settled(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(value) => AsyncState::Value { value },
            Err(error) => AsyncState::Error { error },
        }
    }

    /// True while a call is in flight (or none has ever settled).
    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncState::Loading { .. })
    }

    /// True iff the state is a settled success. Always false while loading.
    pub fn is_value(&self) -> bool {
        matches!(self, AsyncState::Value { .. })
    }

    /// True iff the state is a settled failure. Always false while loading.
    pub fn is_error(&self) -> bool {
        matches!(self, AsyncState::Error { .. })
    }

    /// The settled success payload, if the state is `Value`.
    pub fn value(&self) -> Option<&T> {
        match self {
            AsyncState::Value { value } => Some(value),
            _ => None,
        }
    }

    /// The settled failure payload, if the state is `Error`.
    pub fn error(&self) -> Option<&E> {
        match self {
            AsyncState::Error { error } => Some(error),
            _ => None,
        }
    }

    /// Last known success, looking through `Loading`'s stale payload.
    pub fn latest_value(&self) -> Option<&T> {
        match self {
            AsyncState::Value { value } => Some(value),
            AsyncState::Loading {
                stale: Some(Ok(value)),
            } => Some(value),
            _ => None,
        }
    }

    /// Last known failure, looking through `Loading`'s stale payload.
    pub fn latest_error(&self) -> Option<&E> {
        match self {
            AsyncState::Error { error } => Some(error),
            AsyncState::Loading {
                stale: Some(Err(error)),
            } => Some(error),
            _ => None,
        }
    }

    /// Soft loading transition: marks the state loading while keeping the
    /// settled payload as stale data. Already-loading states are unchanged.
    pub fn into_loading(self) -> Self {
        match self {
            AsyncState::Loading { stale } => AsyncState::Loading { stale },
            AsyncState::Value { value } => AsyncState::Loading {
                stale: Some(Ok(value)),
            },
            AsyncState::Error { error } => AsyncState::Loading {
                stale: Some(Err(error)),
            },
        }
    }
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        AsyncState::loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = AsyncState<u32, &'static str>;

    #[test]
    fn test_default_is_loading_without_stale() {
        let state = State::default();
        assert!(state.is_loading());
        assert!(!state.is_value());
        assert!(!state.is_error());
        assert_eq!(state.latest_value(), None);
        assert_eq!(state.latest_error(), None);
    }

    #[test]
    fn test_predicates_are_mutually_exclusive() {
        let ok = State::settled(Ok(10));
        assert!(ok.is_value() && !ok.is_error() && !ok.is_loading());

        let err = State::settled(Err("boom"));
        assert!(err.is_error() && !err.is_value() && !err.is_loading());
    }

    #[test]
    fn test_loading_answers_false_even_with_stale_payload() {
        let refreshing = State::settled(Err("boom")).into_loading();
        assert!(refreshing.is_loading());
        assert!(!refreshing.is_error());
        assert!(!refreshing.is_value());
        assert_eq!(refreshing.latest_error(), Some(&"boom"));
    }

    #[test]
    fn test_soft_transition_preserves_value() {
        let refreshing = State::settled(Ok(42)).into_loading();
        assert_eq!(refreshing.value(), None);
        assert_eq!(refreshing.latest_value(), Some(&42));
    }

    #[test]
    fn test_soft_transition_is_idempotent() {
        let once = State::settled(Ok(7)).into_loading();
        let twice = once.clone().into_loading();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_settlement_replaces_wholesale() {
        // Settlement drops stale data: after it, the state holds exactly the
        // new outcome.
        let refreshing = State::settled(Ok(1)).into_loading();
        assert_eq!(refreshing.latest_value(), Some(&1));

        let settled = State::settled(Err("late failure"));
        assert_eq!(settled.latest_value(), None);
        assert_eq!(settled.error(), Some(&"late failure"));
    }
}
