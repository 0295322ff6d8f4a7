use regex::Regex;
use std::sync::LazyLock;

static RESERVED_DEVICE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])$").unwrap()
});

/// Returns `true` when `name` is safe to join onto the upload directory.
///
/// Rejects traversal (`..`), path separators, control characters, hidden
/// files, and reserved Windows device names.
pub fn is_safe_filename(name: &str) -> bool {
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return false;
    }

    if name.chars().any(|c| c <= '\u{1f}' || c == '\u{7f}') {
        return false;
    }

    if name.starts_with('.') {
        return false;
    }

    !RESERVED_DEVICE_NAME.is_match(name)
}
