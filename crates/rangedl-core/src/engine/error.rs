//! Orchestrator error type.

use std::path::PathBuf;
use thiserror::Error;

use crate::downloader::RangeError;
use crate::fetch_head::ProbeError;

/// Every variant ends the download; none is retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Probe(#[from] ProbeError),
    /// The server did not report a length, so the resource cannot be split.
    #[error("server did not report Content-Length; cannot split into ranges")]
    UnknownLength,
    #[error("cannot create {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("range {index} failed")]
    Range {
        index: usize,
        #[source]
        source: RangeError,
    },
    #[error("range worker {index} panicked")]
    WorkerPanicked { index: usize },
    /// Workers finished without error but fewer bytes were reported than expected.
    #[error("download incomplete: {received} of {expected} bytes")]
    Incomplete { received: u64, expected: u64 },
    #[error("cannot flush {}", path.display())]
    Sync {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("background task failed")]
    Task(#[from] tokio::task::JoinError),
}
