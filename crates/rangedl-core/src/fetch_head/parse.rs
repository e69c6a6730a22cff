//! Parse HTTP response header lines into HeadResult.

use super::HeadResult;

/// Parse collected header lines into HeadResult.
///
/// libcurl reports the headers of every response in a redirect chain; each
/// status line starts over so only the final response counts.
pub(crate) fn parse_headers(lines: &[String]) -> HeadResult {
    let mut content_length = None;
    let mut accept_ranges = false;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_length = None;
            accept_ranges = false;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse::<u64>().ok();
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                accept_ranges = value.eq_ignore_ascii_case("bytes");
            }
        }
    }

    HeadResult {
        content_length,
        accept_ranges,
        redirected_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_content_length_and_ranges() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Accept-Ranges: bytes",
        ]));
        assert_eq!(r.content_length, Some(12345));
        assert!(r.accept_ranges);
        assert!(r.redirected_url.is_none());
    }

    #[test]
    fn parse_headers_missing_length() {
        let r = parse_headers(&lines(&["HTTP/1.1 200 OK", "Content-Type: text/html"]));
        assert_eq!(r.content_length, None);
        assert!(!r.accept_ranges);
    }

    #[test]
    fn parse_headers_garbage_length_is_absent() {
        let r = parse_headers(&lines(&["HTTP/1.1 200 OK", "content-length: lots"]));
        assert_eq!(r.content_length, None);
    }

    #[test]
    fn parse_headers_only_final_response_counts() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 302 Found",
            "Location: /files/x.bin",
            "Content-Length: 0",
            "",
            "HTTP/1.1 200 OK",
            "Content-Length: 999",
            "Accept-Ranges: none",
        ]));
        assert_eq!(r.content_length, Some(999));
        assert!(!r.accept_ranges);

        let r = parse_headers(&lines(&[
            "HTTP/1.1 301 Moved Permanently",
            "Content-Length: 178",
            "HTTP/1.1 200 OK",
        ]));
        assert_eq!(r.content_length, None);
    }
}
