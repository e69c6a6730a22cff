//! Download orchestration: probe, plan, run workers, report.
//!
//! `prepare` does everything that can fail before any byte is fetched (size
//! probe, output path, file creation). `PreparedDownload::run` then plans the
//! ranges, runs the workers and the progress aggregator, and blocks until the
//! completion signal. The library never exits the process; every fatal
//! condition comes back as an `EngineError`.

mod error;
mod run;

pub use error::EngineError;
pub use run::run_ranges;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::RangedlConfig;
use crate::downloader::CurlFetcher;
use crate::fetch_head::{self, HeadResult};
use crate::progress::ProgressSnapshot;
use crate::request::{CurlOptions, DownloadRequest};
use crate::segmenter::WorkerCount;
use crate::storage::{SharedFile, StorageWriterBuilder};
use crate::url_model;

/// Per-download settings supplied by the CLI layer.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub workers: WorkerCount,
    /// Output path; derived from the (redirected) URL when `None`.
    pub output: Option<PathBuf>,
    pub curl: CurlOptions,
    /// Throughput sampling and render cadence.
    pub progress_interval: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            workers: WorkerCount::default(),
            output: None,
            curl: CurlOptions::default(),
            progress_interval: Duration::from_millis(300),
        }
    }
}

impl DownloadOptions {
    pub fn from_config(cfg: &RangedlConfig, workers: WorkerCount, output: Option<PathBuf>) -> Self {
        Self {
            workers,
            output,
            curl: cfg.curl_options(),
            progress_interval: cfg.progress_interval(),
        }
    }
}

/// Outcome of a successful download.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub total_bytes: u64,
    /// Wall-clock time from worker start to completion.
    pub elapsed: Duration,
    pub redirected_url: Option<String>,
}

impl DownloadReport {
    /// Average throughput over the whole transfer. Elapsed time is floored to
    /// one millisecond so an instant transfer does not divide by zero.
    pub fn average_bytes_per_sec(&self) -> u64 {
        let millis = self.elapsed.as_millis().max(1);
        (self.total_bytes as u128 * 1000 / millis) as u64
    }
}

/// A probed download whose output file is already created.
pub struct PreparedDownload {
    request: Arc<DownloadRequest>,
    head: HeadResult,
    total_size: u64,
    path: PathBuf,
    sink: Arc<SharedFile>,
    workers: WorkerCount,
    fetcher: Arc<CurlFetcher>,
    progress_interval: Duration,
}

impl PreparedDownload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn redirected_url(&self) -> Option<&str> {
        self.head.redirected_url.as_deref()
    }

    pub fn workers(&self) -> WorkerCount {
        self.workers
    }

    /// Runs all range workers and the aggregator; resolves once every byte is written.
    pub async fn run<R>(self, render: R) -> Result<DownloadReport, EngineError>
    where
        R: FnMut(&ProgressSnapshot) + Send + 'static,
    {
        let started = Instant::now();
        run_ranges(
            self.fetcher,
            self.request,
            self.total_size,
            self.workers,
            Arc::clone(&self.sink),
            self.progress_interval,
            render,
        )
        .await?;

        self.sink.sync().map_err(|source| EngineError::Sync {
            path: self.path.clone(),
            source,
        })?;
        let elapsed = started.elapsed();
        tracing::info!(
            path = %self.path.display(),
            bytes = self.total_size,
            elapsed_ms = elapsed.as_millis() as u64,
            "download complete"
        );

        Ok(DownloadReport {
            path: self.path,
            total_bytes: self.total_size,
            elapsed,
            redirected_url: self.head.redirected_url,
        })
    }
}

/// Probes the resource, resolves the output path and creates the output file.
pub async fn prepare(
    request: DownloadRequest,
    options: &DownloadOptions,
) -> Result<PreparedDownload, EngineError> {
    let request = Arc::new(request);
    tracing::info!(url = %request.url, workers = options.workers.get(), "probing");

    let head = tokio::task::spawn_blocking({
        let request = Arc::clone(&request);
        let curl = options.curl.clone();
        move || fetch_head::probe(&request, &curl)
    })
    .await??;

    let total_size = head.content_length.ok_or(EngineError::UnknownLength)?;
    if !head.accept_ranges {
        tracing::debug!("server did not advertise Accept-Ranges: bytes; trying ranges anyway");
    }

    let path = match &options.output {
        Some(p) => p.clone(),
        None => PathBuf::from(url_model::derive_filename(
            &request.url,
            head.redirected_url.as_deref(),
        )),
    };
    let create_failed = |source| EngineError::CreateFile {
        path: path.clone(),
        source,
    };
    let mut builder = StorageWriterBuilder::create(&path).map_err(create_failed)?;
    builder.preallocate(total_size).map_err(create_failed)?;
    tracing::info!(path = %builder.path().display(), total_size, "output file ready");

    Ok(PreparedDownload {
        request,
        head,
        total_size,
        sink: Arc::new(builder.build()),
        path,
        workers: options.workers,
        fetcher: Arc::new(CurlFetcher::new(options.curl.clone())),
        progress_interval: options.progress_interval,
    })
}

/// `prepare` followed by `run`.
pub async fn download<R>(
    request: DownloadRequest,
    options: &DownloadOptions,
    render: R,
) -> Result<DownloadReport, EngineError>
where
    R: FnMut(&ProgressSnapshot) + Send + 'static,
{
    prepare(request, options).await?.run(render).await
}
