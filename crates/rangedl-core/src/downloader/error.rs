//! Range worker error type.

use thiserror::Error;

/// Error returned by a single range download. Every variant is fatal for the
/// whole download; there is no per-range retry.
#[derive(Debug, Error)]
pub enum RangeError {
    /// Curl reported an error: connection, TLS, or a read failure mid-body.
    #[error("transfer failed")]
    Transfer(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing a chunk into the output file failed. Not retried.
    #[error("storage write failed")]
    Storage(#[source] std::io::Error),
    /// The server sent more bytes than the requested range holds.
    #[error("server sent more than the {expected} bytes requested")]
    Overrun { expected: u64 },
    /// The server answered a mid-file range request with the whole resource.
    #[error("server ignored the Range header (HTTP 200 for a range starting at {start})")]
    RangeIgnored { start: u64 },
    /// Body ended cleanly but short of the range length.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
    /// Stopped because another range already failed.
    #[error("aborted after another range failed")]
    Aborted,
}
