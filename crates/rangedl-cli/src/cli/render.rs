//! In-place progress line on stdout.

use std::io::{self, Write};

use rangedl_core::progress::{format_size, ProgressSnapshot};

/// `\r进度：[ 45.0%] 下载速度：[   1.5MB/s]`; speed reads 0B until the first sample.
pub fn progress_line(snapshot: &ProgressSnapshot) -> String {
    format!(
        "\r进度：[{:>5.1}%] 下载速度：[{:>8}/s]",
        snapshot.percent(),
        format_size(snapshot.bytes_per_sec.unwrap_or(0))
    )
}

pub fn print_progress(snapshot: &ProgressSnapshot) {
    let mut out = io::stdout().lock();
    let _ = out.write_all(progress_line(snapshot).as_bytes());
    let _ = out.flush();
}
