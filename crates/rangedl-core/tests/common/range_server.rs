//! Minimal HTTP/1.1 server that supports HEAD and Range GET for integration tests.
//!
//! Serves a single static body at every path except `/redirect`, which answers
//! 302 pointing at `/files/payload.bin`. Every request's headers are recorded
//! so tests can check what the client actually sent.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, HEAD and GET responses carry no Content-Length.
    pub send_length: bool,
    /// If false, GET ignores Range and always returns 200 with the full body.
    pub support_ranges: bool,
    /// Close every GET after this many body bytes while still advertising the full length.
    pub truncate_after: Option<usize>,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            send_length: true,
            support_ranges: true,
            truncate_after: None,
        }
    }
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct RangeServer {
    /// e.g. "http://127.0.0.1:12345" (no trailing slash).
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RangeServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body`. The server runs until the process exits.
pub fn start(body: Vec<u8>) -> RangeServer {
    start_with_options(body, RangeServerOptions::default())
}

/// Like `start` but allows customizing server behavior (no length, truncated bodies, no ranges).
pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &body, opts, &log));
        }
    });
    RangeServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.len() > 64 * 1024 {
            return None;
        }
    }
    String::from_utf8(buf).ok()
}

fn handle(
    mut stream: TcpStream,
    body: &[u8],
    opts: RangeServerOptions,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(head) = read_head(&mut stream) else {
        return;
    };
    let request = parse_request(&head);
    log.lock().unwrap().push(request.clone());

    if request.path == "/redirect" {
        let _ = stream.write_all(
            b"HTTP/1.1 302 Found\r\nLocation: /files/payload.bin\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    let total = body.len() as u64;
    let length_header = |n: usize| {
        if opts.send_length {
            format!("Content-Length: {}\r\n", n)
        } else {
            String::new()
        }
    };

    if request.method.eq_ignore_ascii_case("HEAD") {
        let accept_ranges = if opts.support_ranges {
            "Accept-Ranges: bytes\r\n"
        } else {
            ""
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\n{}{}Connection: close\r\n\r\n",
            length_header(body.len()),
            accept_ranges
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if request.method.eq_ignore_ascii_case("GET") {
        let range = if opts.support_ranges {
            request.header("range").and_then(parse_range)
        } else {
            None
        };
        let (status, content_range, slice) = match range {
            Some((start, end_incl)) => {
                let end_incl = end_incl.min(total.saturating_sub(1));
                if start > end_incl || start >= total {
                    (
                        "416 Range Not Satisfiable",
                        Some(format!("bytes */{}", total)),
                        &body[0..0],
                    )
                } else {
                    (
                        "206 Partial Content",
                        Some(format!("bytes {}-{}/{}", start, end_incl, total)),
                        &body[start as usize..=end_incl as usize],
                    )
                }
            }
            None => ("200 OK", None, body),
        };
        let content_range = content_range
            .map(|v| format!("Content-Range: {}\r\n", v))
            .unwrap_or_default();
        let response = format!(
            "HTTP/1.1 {}\r\n{}{}Connection: close\r\n\r\n",
            status,
            length_header(slice.len()),
            content_range
        );
        let _ = stream.write_all(response.as_bytes());
        let sent = opts.truncate_after.map_or(slice.len(), |n| n.min(slice.len()));
        let _ = stream.write_all(&slice[..sent]);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
}

fn parse_request(head: &str) -> RecordedRequest {
    let mut lines = head.split("\r\n");
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("").to_string();
    let headers = lines
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();
    RecordedRequest {
        method,
        path,
        headers,
    }
}

/// Returns (start, end_inclusive) for `bytes=X-Y`; an open end means to the last byte.
fn parse_range(value: &str) -> Option<(u64, u64)> {
    let bounds = value.trim().strip_prefix("bytes=")?;
    let (a, b) = bounds.split_once('-')?;
    let start = a.trim().parse::<u64>().ok()?;
    let b = b.trim();
    let end_incl = if b.is_empty() {
        u64::MAX
    } else {
        b.parse::<u64>().ok()?
    };
    Some((start, end_incl))
}
