//! Aggregator-local progress state.

use std::time::{Duration, Instant};

use super::{ProgressSnapshot, ProgressSummary};

/// Running total plus the last throughput sample. Owned by the aggregator only.
#[derive(Debug, Clone)]
pub struct ProgressState {
    total: u64,
    received: u64,
    last_sample_at: Instant,
    last_sample_bytes: u64,
    bytes_per_sec: Option<u64>,
}

impl ProgressState {
    pub fn new(total: u64, now: Instant) -> Self {
        Self {
            total,
            received: 0,
            last_sample_at: now,
            last_sample_bytes: 0,
            bytes_per_sec: None,
        }
    }

    /// Add one progress event.
    pub fn record(&mut self, bytes: u64) {
        self.received = self.received.saturating_add(bytes);
    }

    /// Take a throughput sample if at least `interval` has passed since the last one.
    ///
    /// Speed is `(received - received_at_last_sample) / elapsed_since_last_sample`.
    /// Returns true when a sample was taken.
    pub fn sample(&mut self, now: Instant, interval: Duration) -> bool {
        let elapsed = now.saturating_duration_since(self.last_sample_at);
        if elapsed < interval || elapsed.is_zero() {
            return false;
        }
        let delta = self.received - self.last_sample_bytes;
        self.bytes_per_sec = Some((delta as f64 / elapsed.as_secs_f64()) as u64);
        self.last_sample_at = now;
        self.last_sample_bytes = self.received;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.received >= self.total
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            received: self.received,
            total: self.total,
            bytes_per_sec: self.bytes_per_sec,
        }
    }

    pub(crate) fn summary(&self, completed: bool) -> ProgressSummary {
        ProgressSummary {
            received: self.received,
            total: self.total,
            completed,
        }
    }
}
