//! Output filename derivation from the (possibly redirected) URL.

mod path;

pub use path::{keep_last_chars, last_path_segment};

/// Default filename when the URL yields nothing usable.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Longest filename we derive, counted in characters.
pub const MAX_FILENAME_CHARS: usize = 100;

/// Derives the local filename for a download.
///
/// Uses the text after the last `/` of `redirected_url` when a redirect
/// happened, else of `url`, keeping only its last 100 characters.
///
/// # Examples
///
/// - `derive_filename("https://example.com/archive.zip", None)` → `"archive.zip"`
/// - `derive_filename("https://example.com/get?id=1", Some("https://cdn.example.com/f/a.iso"))` → `"a.iso"`
pub fn derive_filename(url: &str, redirected_url: Option<&str>) -> String {
    let source = redirected_url.unwrap_or(url);
    let name = keep_last_chars(last_path_segment(source), MAX_FILENAME_CHARS);
    if name.is_empty() || name == "." || name == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        name.to_string()
    }
}
