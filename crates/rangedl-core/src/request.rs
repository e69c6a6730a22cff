//! Download request descriptor and libcurl handle setup.
//!
//! A `DownloadRequest` is built once by the CLI and shared read-only by the
//! probe and every range worker. `CurlOptions` carries the transport knobs
//! that come from config and is applied to each fresh `Easy` handle.

use std::time::Duration;

/// Target URL plus the optional headers forwarded on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Raw `Cookie` header value. `None` omits the header.
    pub cookie: Option<String>,
    /// Raw `Referer` header value. `None` omits the header.
    pub referer: Option<String>,
}

impl DownloadRequest {
    /// Build a request; empty or whitespace-only cookie/referer values are treated as absent.
    pub fn new(url: impl Into<String>, cookie: Option<String>, referer: Option<String>) -> Self {
        Self {
            url: url.into(),
            cookie: cookie.filter(|c| !c.trim().is_empty()),
            referer: referer.filter(|r| !r.trim().is_empty()),
        }
    }

    /// Extra header lines ("Name: value") to attach to every request.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if let Some(cookie) = &self.cookie {
            lines.push(format!("Cookie: {}", cookie.trim()));
        }
        if let Some(referer) = &self.referer {
            lines.push(format!("Referer: {}", referer.trim()));
        }
        lines
    }
}

/// Transport options applied to each libcurl handle (probe and range GETs).
#[derive(Debug, Clone)]
pub struct CurlOptions {
    /// Receive buffer size; libcurl hands the body to us in chunks up to this size.
    pub buffer_size: usize,
    pub connect_timeout: Duration,
    pub max_redirects: u32,
    pub user_agent: Option<String>,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            buffer_size: 1024 * 1024,
            connect_timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: None,
        }
    }
}

impl CurlOptions {
    /// Apply URL, redirect policy, timeouts and the request's headers to `easy`.
    pub(crate) fn configure(
        &self,
        easy: &mut curl::easy::Easy,
        request: &DownloadRequest,
    ) -> Result<(), curl::Error> {
        easy.url(&request.url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.buffer_size(self.buffer_size)?;
        if let Some(agent) = &self.user_agent {
            easy.useragent(agent)?;
        }

        let lines = request.header_lines();
        if !lines.is_empty() {
            let mut list = curl::easy::List::new();
            for line in &lines {
                list.append(line)?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}
