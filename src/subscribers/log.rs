//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [issued] op=fetch-user call=1
//! [accepted] op=fetch-user call=1 failed=false
//! [discarded] op=fetch-user call=1 failed=false reason=superseded
//! ```

use async_trait::async_trait;

use crate::events::{DiscardReason, Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use — implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let op = e.op.as_deref().unwrap_or("?");
        match e.kind {
            EventKind::CallIssued => {
                if let Some(call) = e.call {
                    println!("[issued] op={op} call={call}");
                }
            }
            EventKind::SettleAccepted => {
                println!(
                    "[accepted] op={op} call={:?} failed={:?}",
                    e.call, e.failed
                );
            }
            EventKind::SettleDiscarded => {
                let reason = match e.discard {
                    Some(DiscardReason::Superseded) => "superseded",
                    Some(DiscardReason::Inactive) => "inactive",
                    None => "?",
                };
                println!(
                    "[discarded] op={op} call={:?} failed={:?} reason={reason}",
                    e.call, e.failed
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
