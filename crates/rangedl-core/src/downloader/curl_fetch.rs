//! Ranged HTTP GET through libcurl.

use std::cell::{Cell, RefCell};
use std::str;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{RangeError, RangeFetcher};
use crate::request::{CurlOptions, DownloadRequest};
use crate::segmenter::ByteRange;

/// Production fetcher: one fresh `Easy` handle per range.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: CurlOptions,
}

impl CurlFetcher {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }
}

impl RangeFetcher for CurlFetcher {
    fn fetch(
        &self,
        request: &DownloadRequest,
        range: ByteRange,
        abort: &AtomicBool,
        on_chunk: &mut dyn FnMut(&[u8]) -> Result<(), RangeError>,
    ) -> Result<(), RangeError> {
        let chunk_error: RefCell<Option<RangeError>> = RefCell::new(None);
        let status = Cell::new(0u32);

        let mut easy = curl::easy::Easy::new();
        self.options.configure(&mut easy, request)?;
        easy.fail_on_error(true)?;
        easy.range(&range.curl_range())?;
        easy.progress(true)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                if let Some(code) = str::from_utf8(line).ok().and_then(parse_status_line) {
                    status.set(code);
                }
                true
            })?;
            transfer.write_function(|data| {
                // Servers that ignore Range answer 200 with the whole body.
                let result = if status.get() == 200 && range.start > 0 {
                    Err(RangeError::RangeIgnored { start: range.start })
                } else {
                    on_chunk(data)
                };
                match result {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        chunk_error.borrow_mut().replace(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;

            if let Err(e) = transfer.perform() {
                if let Some(err) = chunk_error.borrow_mut().take() {
                    return Err(err);
                }
                if e.is_aborted_by_callback() {
                    return Err(RangeError::Aborted);
                }
                return Err(RangeError::Transfer(e));
            }
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(RangeError::Http(code));
        }
        Ok(())
    }
}

/// Status code from an `HTTP/1.1 206 Partial Content` style line.
fn parse_status_line(line: &str) -> Option<u32> {
    let mut parts = line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
