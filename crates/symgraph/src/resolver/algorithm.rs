//! Lexical path helpers used by resolution.
//!
//! Everything here is pure string work over repo-relative, forward-slash
//! paths. Nothing touches the filesystem.

use std::path::Path;

use path_clean::PathClean;

/// Resolve `.` and `..` segments and normalize separators.
///
/// Returns an empty string for a path that cleans to the current directory.
pub fn normalize(path: &str) -> String {
    let cleaned = Path::new(path).to_path_buf().clean();
    let cleaned = cleaned.to_string_lossy().replace('\\', "/");
    if cleaned == "." {
        String::new()
    } else {
        cleaned
    }
}

/// Directory part of a repo-relative path (`""` for top-level files).
pub fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Join a relative specifier onto the directory of `from` and normalize.
pub fn join_relative(from: &str, specifier: &str) -> String {
    let dir = dirname(from);
    if dir.is_empty() {
        normalize(specifier)
    } else {
        normalize(&format!("{dir}/{specifier}"))
    }
}

/// Whether a specifier is relative to the importing file.
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}
