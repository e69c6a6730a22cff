//! In-memory fetchers and writers for exercising workers and the engine
//! without a network or a real file.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use super::{RangeError, RangeFetcher};
use crate::request::DownloadRequest;
use crate::segmenter::ByteRange;
use crate::storage::PositionedWrite;

/// Serves ranges out of an in-memory body in fixed-size chunks.
pub(crate) struct MemoryFetcher {
    body: Vec<u8>,
    chunk: usize,
    ignore_range: bool,
    fail_at: Option<u64>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MemoryFetcher {
    pub(crate) fn new(body: Vec<u8>, chunk: usize) -> Self {
        Self {
            body,
            chunk,
            ignore_range: false,
            fail_at: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Behaves like a server answering every range with the full body.
    pub(crate) fn ignoring_range(body: Vec<u8>, chunk: usize) -> Self {
        Self {
            ignore_range: true,
            ..Self::new(body, chunk)
        }
    }

    /// The transfer fails with a receive error before delivering the chunk containing `offset`.
    pub(crate) fn fail_at(mut self, offset: u64) -> Self {
        self.fail_at = Some(offset);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RangeFetcher for MemoryFetcher {
    fn fetch(
        &self,
        _request: &DownloadRequest,
        range: ByteRange,
        _abort: &AtomicBool,
        on_chunk: &mut dyn FnMut(&[u8]) -> Result<(), RangeError>,
    ) -> Result<(), RangeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let total = self.body.len() as u64;
        let (start, end) = if self.ignore_range {
            (0, total)
        } else {
            (range.start.min(total), range.end.min(total))
        };

        let mut pos = start;
        while pos < end {
            let next = (pos + self.chunk as u64).min(end);
            if let Some(at) = self.fail_at {
                if (pos..next).contains(&at) {
                    // CURLE_RECV_ERROR, as curl reports a reset mid-body.
                    return Err(RangeError::Transfer(curl::Error::new(56)));
                }
            }
            on_chunk(&self.body[pos as usize..next as usize])?;
            pos = next;
            if let Some(d) = self.delay {
                std::thread::sleep(d);
            }
        }
        Ok(())
    }
}

/// Growable in-memory file that records how many writers were ever inside
/// `write_at` at the same time.
pub(crate) struct MemoryWriter {
    data: Vec<u8>,
    writes: usize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl MemoryWriter {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            data: vec![0; len],
            writes: 0,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes
    }

    pub(crate) fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl PositionedWrite for MemoryWriter {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        let start = offset as usize;
        let end = start + data.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(data);
        self.writes += 1;
        // Widen the window in which a second writer would be observed.
        std::thread::yield_now();

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
