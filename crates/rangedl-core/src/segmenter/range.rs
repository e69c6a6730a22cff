//! Byte range type and range planning.

use super::WorkerCount;

/// A single worker's byte range [start, end) (half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl ByteRange {
    /// Length of this range in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// True when consecutive boundaries coincide; such a range needs no request.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Curl range option value, end inclusive: `start-(end-1)`.
    pub fn curl_range(&self) -> String {
        format!("{}-{}", self.start, self.end.saturating_sub(1))
    }

    /// HTTP Range header value (inclusive end): `bytes=start-(end-1)`.
    pub fn range_header_value(&self) -> String {
        format!("bytes={}", self.curl_range())
    }
}

/// Computes `workers + 1` offsets splitting `total_size` into contiguous ranges.
///
/// Every range but the last is `total_size / workers` bytes; the last boundary
/// is pinned to `total_size` so the truncation remainder lands in the last range.
/// When `total_size < workers` leading boundaries collapse to 0 and the
/// corresponding ranges are empty.
pub fn plan_boundaries(total_size: u64, workers: WorkerCount) -> Vec<u64> {
    let n = workers.get() as u64;
    let step = total_size / n;

    let mut out = Vec::with_capacity(workers.get() + 1);
    for i in 0..n {
        out.push(step * i);
    }
    out.push(total_size);
    out
}

/// Pairs consecutive boundaries into one `ByteRange` per worker.
pub fn plan_ranges(total_size: u64, workers: WorkerCount) -> Vec<ByteRange> {
    plan_boundaries(total_size, workers)
        .windows(2)
        .map(|w| ByteRange {
            start: w[0],
            end: w[1],
        })
        .collect()
}
