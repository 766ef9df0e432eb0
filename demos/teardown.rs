//! # Example: teardown
//!
//! Demonstrates liveness gating: once the consumer scope is retired, pending
//! settlements no longer touch the observable state — but their callers still
//! get the real results.
//!
//! ## Run
//! ```bash
//! cargo run --example teardown
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use lastcall::{OpFn, ScopeToken, Tracker};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== teardown example ===\n");

    // 1. Tracker bound to a consumer scope.
    let scope = ScopeToken::new();
    let tracker = Arc::new(
        Tracker::builder(OpFn::arc("load", |delay_ms: u64| async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok::<u64, Infallible>(delay_ms)
        }))
        .with_liveness(Arc::new(scope.clone()))
        .build(),
    );

    // 2. Start a call, then tear the consumer down mid-flight.
    let pending = {
        let t = Arc::clone(&tracker);
        tokio::spawn(async move { t.invoke(100).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    println!("[main] retiring scope while the call is settling...");
    scope.retire();

    // 3. The caller still observes the real outcome.
    let out = pending.await??;
    println!("[caller] got: {out}");

    // 4. The state was shielded: still loading, exactly as at teardown.
    let state = tracker.state();
    println!("[state] loading={} (settlement suppressed)", state.is_loading());
    assert!(state.is_loading());

    println!("\n=== example completed successfully ===");
    Ok(())
}
