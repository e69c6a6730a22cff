//! CLI for rangedl: one URL in, one file out.

mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rangedl_core::config::{self, RangedlConfig};
use rangedl_core::engine::{self, DownloadOptions, EngineError};
use rangedl_core::progress::format_size;
use rangedl_core::request::DownloadRequest;
use rangedl_core::segmenter::WorkerCount;

/// Top-level CLI for the rangedl downloader.
#[derive(Debug, Parser)]
#[command(name = "rangedl", version)]
#[command(about = "rangedl: multi-connection HTTP(S) downloader", long_about = None)]
pub struct Cli {
    /// Direct HTTP/HTTPS URL to download.
    pub url: String,

    /// Number of parallel connections (clamped to 1..=50).
    #[arg(
        short = 'n',
        value_name = "N",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    pub workers: i64,

    /// Output file. Defaults to the last path segment of the (redirected) URL.
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<String>,

    /// Raw Cookie header value sent with every request.
    #[arg(short = 'c', value_name = "COOKIE")]
    pub cookie: Option<String>,

    /// Referer header value sent with every request.
    #[arg(short = 'r', value_name = "URL")]
    pub referer: Option<String>,
}

impl Cli {
    /// Parses process arguments. Usage errors print to stderr and exit with status 1;
    /// `--help` and `--version` exit normally.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) if e.use_stderr() => {
                let _ = e.print();
                std::process::exit(1);
            }
            Err(e) => e.exit(),
        }
    }

    pub fn worker_count(&self) -> WorkerCount {
        WorkerCount::clamped(self.workers)
    }

    pub fn request(&self) -> DownloadRequest {
        DownloadRequest::new(self.url.clone(), self.cookie.clone(), self.referer.clone())
    }

    pub fn download_options(&self, cfg: &RangedlConfig) -> DownloadOptions {
        let output = self
            .output
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        DownloadOptions::from_config(cfg, self.worker_count(), output)
    }
}

/// Probes, downloads and prints the console lines for one invocation.
pub async fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("config unavailable, using defaults: {:#}", e);
        RangedlConfig::default()
    });
    tracing::debug!("loaded config: {:?}", cfg);

    let options = cli.download_options(&cfg);
    let prepared = engine::prepare(cli.request(), &options)
        .await
        .map_err(describe)?;

    if let Some(url) = prepared.redirected_url() {
        println!("重定向至：{}", url);
    }
    println!(
        "开始下载: {} [{}]",
        prepared.path().display(),
        format_size(prepared.total_size())
    );

    let result = prepared.run(render::print_progress).await;
    // Terminate the in-place progress line.
    println!();
    let report = result.map_err(describe)?;

    println!(
        "下载完成！平均速度：{}/s",
        format_size(report.average_bytes_per_sec())
    );
    Ok(())
}

/// Wraps an engine error in the short diagnostic shown to the user.
fn describe(err: EngineError) -> anyhow::Error {
    let message = match &err {
        EngineError::Probe(_) => "连接失败！".to_string(),
        EngineError::UnknownLength => "无法获取文件长度，不能多线程下载".to_string(),
        EngineError::CreateFile { path, .. } => format!("无法创建文件: {}", path.display()),
        _ => "分线程下载失败".to_string(),
    };
    anyhow::Error::new(err).context(message)
}
