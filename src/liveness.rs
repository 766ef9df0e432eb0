//! # Consumer liveness as an injected capability.
//!
//! Settlement writes are suppressed once the consuming scope is gone. The
//! tracker does not know (or care) what a "scope" is — it only asks an
//! injected [`Liveness`] whether the consumer is still active.
//!
//! ## Rules
//! - `is_active()` is monotonic: once it returns `false` it returns `false`
//!   forever. [`ScopeToken`] enforces this by wrapping a
//!   [`CancellationToken`], which cannot be un-cancelled.
//! - The tracker only reads liveness; retiring a scope is the owner's job.

use tokio_util::sync::CancellationToken;

/// Answers "is the consumer still active?" at settlement time.
///
/// Implementations must be monotonic: after the first `false`, every later
/// call returns `false` as well.
pub trait Liveness: Send + Sync + 'static {
    /// Returns true while the consuming scope is alive.
    fn is_active(&self) -> bool;
}

/// Liveness handle for a consumer scope.
///
/// Cloned freely; all clones observe the same retirement. [`ScopeToken::child`]
/// derives a scope that retires with its parent but can also retire on its
/// own, mirroring `CancellationToken::child_token`.
///
/// # Example
/// ```
/// use lastcall::{Liveness, ScopeToken};
///
/// let scope = ScopeToken::new();
/// assert!(scope.is_active());
/// scope.retire();
/// assert!(!scope.is_active());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScopeToken {
    token: CancellationToken,
}

impl ScopeToken {
    /// Creates an active scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retires the scope. Idempotent; propagates to child scopes.
    pub fn retire(&self) {
        self.token.cancel();
    }

    /// True once the scope has been retired.
    pub fn is_retired(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Derives a child scope that retires when this one does.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }
}

impl Liveness for ScopeToken {
    fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }
}

impl Liveness for CancellationToken {
    fn is_active(&self) -> bool {
        !self.is_cancelled()
    }
}

/// Liveness that never expires.
///
/// Default for trackers whose consumer outlives every call (CLIs, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysActive;

impl Liveness for AlwaysActive {
    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_starts_active_and_retires_once() {
        let scope = ScopeToken::new();
        assert!(scope.is_active());
        scope.retire();
        assert!(!scope.is_active());
        scope.retire(); // idempotent
        assert!(!scope.is_active());
    }

    #[test]
    fn test_clones_share_retirement() {
        let scope = ScopeToken::new();
        let other = scope.clone();
        scope.retire();
        assert!(!other.is_active());
    }

    #[test]
    fn test_child_retires_with_parent_but_not_vice_versa() {
        let parent = ScopeToken::new();
        let child = parent.child();

        let lone = parent.child();
        lone.retire();
        assert!(parent.is_active());
        assert!(child.is_active());

        parent.retire();
        assert!(!child.is_active());
    }

    #[test]
    fn test_always_active_never_expires() {
        assert!(AlwaysActive.is_active());
    }
}
