//! Project scanning.
//!
//! Walks the project root with `ignore`, so `.gitignore`, `.ignore` and global
//! git excludes apply even outside a git checkout. `node_modules` and `.git`
//! are never entered. Every remaining file lands in the index under its
//! root-relative, forward-slash path; which of them get parsed is decided by
//! the graph builder.

use std::path::Path;

use ignore::{DirEntry, WalkBuilder, overrides::OverrideBuilder};
use symgraph::{DiskSource, FileIndex};

use crate::error::{ConfigError, Result};

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Build a [`FileIndex`] of every file under `root`.
///
/// `exclude` holds `.gitignore`-style globs relative to `root`.
pub fn scan_project(root: &Path, exclude: &[String]) -> Result<FileIndex> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in exclude {
        overrides
            .add(&format!("!{pattern}"))
            .map_err(|e| ConfigError::InvalidExclude {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
    }
    let overrides = overrides.build().map_err(|e| ConfigError::InvalidExclude {
        pattern: exclude.join(", "),
        reason: e.to_string(),
    })?;

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .parents(true)
        .require_git(false)
        .overrides(overrides)
        .filter_entry(|entry| !is_skipped_dir(entry))
        .build();

    let mut index = FileIndex::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(rel_path) = relative_path(root, entry.path()) else {
            continue;
        };
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                tracing::warn!(path = %rel_path, error = %err, "skipping file without metadata");
                continue;
            }
        };
        index.insert_source(&rel_path, DiskSource::new(entry.path(), size));
    }

    tracing::debug!(
        root = %root.display(),
        files = index.len(),
        bytes = index.total_size(),
        "project scanned"
    );
    Ok(index)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// `path` relative to `root`, with `/` separators.
pub(crate) fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
