//! Progress fan-in from range workers and throughput sampling.
//!
//! Workers send plain byte counts over an unbounded MPSC channel; a single
//! aggregator task owns the running total, samples instantaneous speed on a
//! fixed cadence, hands snapshots to a renderer and fires a one-shot
//! completion signal once every byte has been reported.

mod aggregator;
mod format;
mod state;

pub use aggregator::aggregate;
pub use format::format_size;
pub use state::ProgressState;

/// Sending half given to each range worker. Events are byte counts.
pub type ProgressSender = tokio::sync::mpsc::UnboundedSender<u64>;
/// Receiving half owned by the aggregator.
pub type ProgressReceiver = tokio::sync::mpsc::UnboundedReceiver<u64>;

/// What the renderer sees on each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Bytes reported by all workers so far.
    pub received: u64,
    /// Total resource length.
    pub total: u64,
    /// Instantaneous speed from the last sample; `None` until the first sample.
    pub bytes_per_sec: Option<u64>,
}

impl ProgressSnapshot {
    /// Percentage complete in [0.0, 100.0]; an empty resource is 100%.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.received as f64 / self.total as f64 * 100.0).min(100.0)
    }
}

/// Final aggregator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub received: u64,
    pub total: u64,
    /// Whether the completion signal was sent.
    pub completed: bool,
}
