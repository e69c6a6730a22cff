//! The single consumer of all worker progress events.

use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use super::{ProgressReceiver, ProgressSnapshot, ProgressState, ProgressSummary};

/// Consumes progress events until `total` bytes have been reported.
///
/// Renders a snapshot whenever a throughput sample is taken (at most once per
/// `interval`, including idle ticks with no events) and once more on
/// completion, then fires `done`. If every sender is dropped first, returns
/// without firing `done`.
pub async fn aggregate<R>(
    mut rx: ProgressReceiver,
    total: u64,
    interval: Duration,
    done: oneshot::Sender<()>,
    mut render: R,
) -> ProgressSummary
where
    R: FnMut(&ProgressSnapshot) + Send,
{
    let mut state = ProgressState::new(total, Instant::now());

    while !state.is_complete() {
        match tokio::time::timeout(interval, rx.recv()).await {
            Ok(Some(bytes)) => state.record(bytes),
            Ok(None) => {
                tracing::debug!(
                    received = state.received(),
                    total,
                    "progress channel closed before completion"
                );
                return state.summary(false);
            }
            Err(_) => {} // idle tick
        }
        if state.sample(Instant::now(), interval) {
            render(&state.snapshot());
        }
    }

    render(&state.snapshot());
    let _ = done.send(());
    tracing::debug!(received = state.received(), total, "all bytes reported");
    state.summary(true)
}
