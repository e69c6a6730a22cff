//! Size probe: HTTP HEAD through libcurl.
//!
//! Learns the total length the range planner needs and, when the server
//! redirected us, the final URL (used for filename derivation). The redirect
//! target is part of the result instead of being captured from a hook.

mod parse;

use std::str;
use thiserror::Error;

use crate::request::{CurlOptions, DownloadRequest};

/// Result of a HEAD request: the headers needed for a parallel range download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResult {
    /// Total size in bytes, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
    /// True if server sent `Accept-Ranges: bytes`. Informational only.
    pub accept_ranges: bool,
    /// Final URL when at least one redirect was followed.
    pub redirected_url: Option<String>,
}

/// Probe failure: the request could not be completed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connection, DNS, TLS or protocol error.
    #[error("HEAD request failed")]
    Curl(#[from] curl::Error),
    /// Final response had a non-2xx status.
    #[error("HEAD {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
}

/// Performs a HEAD request (no body), following redirects.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn probe(request: &DownloadRequest, options: &CurlOptions) -> Result<HeadResult, ProbeError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    options.configure(&mut easy, request)?;
    easy.nobody(true)?; // HEAD request

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(ProbeError::Http {
            url: request.url.clone(),
            code,
        });
    }

    let redirected_url = if easy.redirect_count()? > 0 {
        easy.effective_url()?.map(str::to_string)
    } else {
        None
    };

    let mut result = parse::parse_headers(&headers);
    result.redirected_url = redirected_url;
    tracing::debug!(
        url = %request.url,
        content_length = ?result.content_length,
        accept_ranges = result.accept_ranges,
        redirected = ?result.redirected_url,
        "probe finished"
    );
    Ok(result)
}
