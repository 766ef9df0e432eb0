//! # Example: supersede
//!
//! Demonstrates the staleness gate: a slow call issued first is superseded by
//! a fast call issued second, and its late settlement is discarded.
//!
//! Shows how to:
//! - Run overlapping invocations of the same tracker
//! - Observe gate decisions through the [`LogWriter`] subscriber
//! - Verify the state reflects only the most recent call
//!
//! ## Flow
//! ```text
//! t=0ms    invoke("slow")  → call 1, settles at t=200ms
//! t=10ms   invoke("fast")  → call 2, settles at t=30ms
//! t=30ms   call 2 accepted → state = Value("fast")
//! t=200ms  call 1 discarded (superseded) → state unchanged
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example supersede --features logging
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use lastcall::{LogWriter, OpFn, Subscribe, Tracker};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== supersede example ===\n");

    // 1. Operation whose settlement time depends on its arguments.
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let tracker = Arc::new(
        Tracker::builder(OpFn::arc(
            "query",
            |(label, delay_ms): (&'static str, u64)| async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok::<&'static str, Infallible>(label)
            },
        ))
        .with_subscribers(subs)
        .build(),
    );

    // 2. Issue a slow call, then a fast one on top of it.
    let slow = {
        let t = Arc::clone(&tracker);
        tokio::spawn(async move { t.invoke(("slow", 200)).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let fast = {
        let t = Arc::clone(&tracker);
        tokio::spawn(async move { t.invoke(("fast", 20)).await })
    };

    // 3. Both callers see their own results...
    let slow_out = slow.await??;
    let fast_out = fast.await??;
    println!("\n[caller] slow got: {slow_out}");
    println!("[caller] fast got: {fast_out}");

    // 4. ...but the state holds only the most recent call's outcome.
    let state = tracker.state();
    println!("[state] {state:?}");
    assert_eq!(state.value(), Some(&"fast"));

    println!("\n=== example completed successfully ===");
    Ok(())
}
