//! Concurrent execution of range workers against one shared file.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use super::EngineError;
use crate::downloader::{self, RangeError, RangeFetcher};
use crate::progress::{self, ProgressSnapshot, ProgressSummary};
use crate::request::DownloadRequest;
use crate::segmenter::{self, WorkerCount};
use crate::storage::{PositionedWrite, SharedFile};

/// Plans `workers` ranges over `total_size`, runs one blocking task per range
/// plus the progress aggregator, and waits for the completion signal.
///
/// The first range to fail raises a shared abort flag so the others stop at
/// their next chunk; every worker is joined before returning. Success means
/// the aggregator saw all `total_size` bytes and no worker reported an error.
pub async fn run_ranges<F, W, R>(
    fetcher: Arc<F>,
    request: Arc<DownloadRequest>,
    total_size: u64,
    workers: WorkerCount,
    sink: Arc<SharedFile<W>>,
    interval: Duration,
    render: R,
) -> Result<ProgressSummary, EngineError>
where
    F: RangeFetcher + 'static,
    W: PositionedWrite + 'static,
    R: FnMut(&ProgressSnapshot) + Send + 'static,
{
    let ranges = segmenter::plan_ranges(total_size, workers);
    tracing::debug!(total_size, workers = workers.get(), ?ranges, "range plan");

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = oneshot::channel();
    let aggregator = tokio::spawn(progress::aggregate(
        progress_rx,
        total_size,
        interval,
        done_tx,
        render,
    ));

    let abort = Arc::new(AtomicBool::new(false));
    let mut handles = Vec::with_capacity(ranges.len());
    for (index, range) in ranges.into_iter().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        let request = Arc::clone(&request);
        let sink = Arc::clone(&sink);
        let tx = progress_tx.clone();
        let abort = Arc::clone(&abort);
        handles.push(tokio::task::spawn_blocking(move || {
            if range.is_empty() {
                return Ok(0);
            }
            tracing::debug!(index, start = range.start, end = range.end, "range started");
            let res =
                downloader::download_range(&*fetcher, &*request, range, &*sink, &tx, &*abort);
            match &res {
                Ok(n) => tracing::debug!(index, bytes = n, "range finished"),
                Err(RangeError::Aborted) => tracing::debug!(index, "range aborted"),
                Err(e) => {
                    tracing::warn!(index, error = %e, "range failed, aborting download");
                    abort.store(true, Ordering::Relaxed);
                }
            }
            res
        }));
    }
    // Only workers hold senders now; the channel closes when the last one exits.
    drop(progress_tx);

    let completed = done_rx.await.is_ok();

    let mut first_error: Option<EngineError> = None;
    for (index, handle) in handles.into_iter().enumerate() {
        let err = match handle.await {
            Ok(Ok(_)) | Ok(Err(RangeError::Aborted)) => None,
            Ok(Err(source)) => Some(EngineError::Range { index, source }),
            Err(e) if e.is_panic() => {
                abort.store(true, Ordering::Relaxed);
                Some(EngineError::WorkerPanicked { index })
            }
            Err(e) => Some(EngineError::Task(e)),
        };
        if first_error.is_none() {
            first_error = err;
        }
    }

    let summary = aggregator.await?;
    if let Some(e) = first_error {
        return Err(e);
    }
    if !completed || !summary.completed {
        return Err(EngineError::Incomplete {
            received: summary.received,
            expected: total_size,
        });
    }
    Ok(summary)
}
