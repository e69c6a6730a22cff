//! String helpers for URL-derived filenames.

/// Text after the last `/` (the whole input if there is none).
pub fn last_path_segment(url: &str) -> &str {
    match url.rfind('/') {
        Some(i) => &url[i + 1..],
        None => url,
    }
}

/// The last `max` characters of `s`, cut on a char boundary.
pub fn keep_last_chars(s: &str, max: usize) -> &str {
    let count = s.chars().count();
    if count <= max {
        return s;
    }
    match s.char_indices().nth(count - max) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}
