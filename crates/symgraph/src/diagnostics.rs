//! Non-fatal problems collected while building a graph.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

/// Pass in which a per-file traversal failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Pass {
    Discovery,
    Linking,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Discovery => f.write_str("symbol discovery"),
            Pass::Linking => f.write_str("dependency linking"),
        }
    }
}

/// A single non-fatal failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The file text could not be fetched.
    ReadFailed { path: String, message: String },

    /// The file exceeds the parse size limit and was skipped.
    FileTooLarge { path: String, size: u64, max: u64 },

    /// The parser gave up on the file; it is absent from the graph.
    ParseFailed { path: String, message: String },

    /// The parser recovered; the file is in the graph but may be incomplete.
    RecoverableParseErrors {
        path: String,
        count: usize,
        first: String,
    },

    /// A relative import tried to reach into another package.
    IllegalCrossPackageImport {
        from: String,
        specifier: String,
        target: String,
    },

    /// Walking an already-parsed file failed part way through.
    TraversalFailed {
        pass: Pass,
        path: String,
        message: String,
    },
}

impl Diagnostic {
    /// The file the diagnostic is about.
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::ReadFailed { path, .. }
            | Diagnostic::FileTooLarge { path, .. }
            | Diagnostic::ParseFailed { path, .. }
            | Diagnostic::RecoverableParseErrors { path, .. }
            | Diagnostic::TraversalFailed { path, .. } => path,
            Diagnostic::IllegalCrossPackageImport { from, .. } => from,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ReadFailed { path, message } => {
                write!(f, "Failed to read {path}: {message}")
            }
            Diagnostic::FileTooLarge { path, size, max } => {
                write!(f, "Skipped {path}: {size} bytes exceeds the {max} byte limit")
            }
            Diagnostic::ParseFailed { path, message } => {
                write!(f, "Failed to parse {path}: {message}")
            }
            Diagnostic::RecoverableParseErrors { path, count, first } => {
                write!(f, "Parsed {path} with {count} error(s), first: {first}")
            }
            Diagnostic::IllegalCrossPackageImport {
                from,
                specifier,
                target,
            } => write!(
                f,
                "Illegal cross-package relative import in {from}: '{specifier}' resolves to {target}, use the package alias instead"
            ),
            Diagnostic::TraversalFailed {
                pass,
                path,
                message,
            } => write!(f, "Error during {pass} in {path}: {message}"),
        }
    }
}

/// Ordered, append-only list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable message for every diagnostic, in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Whether any diagnostic mentions `path`.
    pub fn mentions(&self, path: &str) -> bool {
        self.entries.iter().any(|d| d.to_string().contains(path))
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Run one file's share of a pass, turning a panic into a diagnostic.
///
/// Returns `None` when `f` panicked; the caller then applies nothing for
/// that file.
pub(crate) fn isolate<T>(
    pass: Pass,
    path: &str,
    diagnostics: &mut Diagnostics,
    f: impl FnOnce(&mut Diagnostics) -> T,
) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(|| f(diagnostics))) {
        Ok(value) => Some(value),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%pass, path, error = %message, "panic while walking file");
            diagnostics.push(Diagnostic::TraversalFailed {
                pass,
                path: path.to_string(),
                message,
            });
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
