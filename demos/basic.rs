//! # Example: basic
//!
//! Demonstrates the happy path: wrap an async "fetch", invoke it, and watch
//! the observable state move from loading to settled.
//!
//! Shows how to:
//! - Wrap an async function with [`OpFn`] and track it with [`Tracker`]
//! - Read the live state via [`Tracker::handle`]
//! - Observe that the caller gets the operation's own result
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::time::Duration;

use lastcall::{OpFn, Tracker};
use thiserror::Error;

#[derive(Clone, Debug, Error)]
enum FetchError {
    #[error("user {0} not found")]
    NotFound(u64),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== basic example ===\n");

    // 1. Wrap a pretend network fetch.
    let tracker = Tracker::new(OpFn::arc("fetch-user", |user_id: u64| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        if user_id == 0 {
            return Err(FetchError::NotFound(user_id));
        }
        Ok(format!("user-{user_id}"))
    }));

    // 2. Watch the state from another task.
    let mut handle = tracker.handle();
    let watcher = tokio::spawn(async move {
        while handle.changed().await.is_ok() {
            let state = handle.snapshot();
            println!("[watcher] loading={} state={state:?}", state.is_loading());
            if !state.is_loading() {
                break;
            }
        }
    });

    // 3. Invoke: the caller gets the real outcome, the state follows.
    let out = tracker.invoke(7).await?;
    println!("[caller] got: {out}");
    watcher.await?;

    assert_eq!(tracker.state().value().map(String::as_str), Some("user-7"));

    // 4. A failed call settles the state into Error.
    let err = tracker.invoke(0).await.unwrap_err();
    println!("[caller] got error: {err}");
    assert!(tracker.state().is_error());

    println!("\n=== example completed successfully ===");
    Ok(())
}
