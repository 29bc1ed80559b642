//! Local filename derivation for downloaded images.
//!
//! Downloads are named `space_{index}.{ext}` so re-runs overwrite the same
//! files instead of accumulating stale ones. The extension is taken from the
//! URL path when it looks like a real image extension, `jpg` otherwise.

/// Fallback extension when the URL path yields nothing usable.
const DEFAULT_EXTENSION: &str = "jpg";

/// Extracts a usable file extension from the last path segment of a URL.
///
/// Returns `None` if the URL cannot be parsed, the path has no extension, or
/// the extension is not plain ASCII alphanumeric (query strings are ignored by
/// the URL parser).
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 5 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Destination filename for the `index`-th image task.
pub fn task_filename(index: usize, url: &str) -> String {
    let ext = extension_from_url(url).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("space_{}.{}", index, ext)
}
