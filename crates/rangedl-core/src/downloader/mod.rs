//! Range worker: one ranged GET streamed into the shared output file.
//!
//! Each worker owns exactly one `ByteRange`. It streams the body, writes every
//! chunk at the running offset through the `SharedFile` lock and then reports
//! the chunk length to the progress aggregator. Any failure is fatal for the
//! whole download; the caller raises the shared abort flag so siblings stop.

mod curl_fetch;
mod error;
#[cfg(test)]
pub(crate) mod testing;

pub use curl_fetch::CurlFetcher;
pub use error::RangeError;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::progress::ProgressSender;
use crate::request::DownloadRequest;
use crate::segmenter::ByteRange;
use crate::storage::{PositionedWrite, SharedFile};

/// Streams the body of one byte range to a chunk callback.
///
/// The callback may reject a chunk; implementations must then stop the
/// transfer and return that error. `abort` is raised when another range has
/// failed and should end an idle transfer as `RangeError::Aborted`.
pub trait RangeFetcher: Send + Sync {
    fn fetch(
        &self,
        request: &DownloadRequest,
        range: ByteRange,
        abort: &AtomicBool,
        on_chunk: &mut dyn FnMut(&[u8]) -> Result<(), RangeError>,
    ) -> Result<(), RangeError>;
}

/// Downloads `range` into `sink` and returns the number of bytes written.
///
/// Empty ranges return `Ok(0)` without a request. Progress for a chunk is
/// sent only after the chunk has been written.
pub fn download_range<F, W>(
    fetcher: &F,
    request: &DownloadRequest,
    range: ByteRange,
    sink: &SharedFile<W>,
    progress: &ProgressSender,
    abort: &AtomicBool,
) -> Result<u64, RangeError>
where
    F: RangeFetcher + ?Sized,
    W: PositionedWrite,
{
    if range.is_empty() {
        return Ok(0);
    }

    let mut offset = range.start;
    fetcher.fetch(request, range, abort, &mut |chunk: &[u8]| {
        if abort.load(Ordering::Relaxed) {
            return Err(RangeError::Aborted);
        }
        if chunk.is_empty() {
            return Ok(());
        }
        let next = offset + chunk.len() as u64;
        if next > range.end {
            return Err(RangeError::Overrun {
                expected: range.len(),
            });
        }
        sink.write_at(offset, chunk).map_err(RangeError::Storage)?;
        offset = next;
        // Aggregator may already be done; late events are not needed.
        let _ = progress.send(chunk.len() as u64);
        Ok(())
    })?;

    let received = offset - range.start;
    if received != range.len() {
        return Err(RangeError::PartialTransfer {
            expected: range.len(),
            received,
        });
    }
    Ok(received)
}
