//! Parse every source file once and keep the ASTs for the later passes.
//!
//! ASTs live in an [`oxc_allocator::Allocator`] owned by the caller, so the
//! cache borrows it for `'a` and the linking pass can walk any file's tree
//! while resolving re-exports.

use std::collections::BTreeMap;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType as OxcSourceType;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::source::{FileIndex, SourceKind};

/// Maximum file size in bytes (10 MB).
///
/// Larger files are skipped before parsing to keep a single generated bundle
/// from dominating the build.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Text of one parseable file, fetched from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub path: String,
    pub text: String,
}

impl LoadedSource {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Fetch the text of every parseable file in the index.
///
/// This is the only place the core awaits. Unreadable and oversized files are
/// reported and skipped.
pub async fn load_sources(index: &FileIndex, diagnostics: &mut Diagnostics) -> Vec<LoadedSource> {
    let mut sources = Vec::new();

    for entry in index.entries().filter(|e| e.kind().is_parseable()) {
        if entry.size > MAX_FILE_SIZE {
            tracing::warn!(path = %entry.path, size = entry.size, "skipping oversized file");
            diagnostics.push(Diagnostic::FileTooLarge {
                path: entry.path.clone(),
                size: entry.size,
                max: MAX_FILE_SIZE,
            });
            continue;
        }

        match entry.source.text().await {
            Ok(text) if text.len() as u64 > MAX_FILE_SIZE => {
                // The index size was stale.
                diagnostics.push(Diagnostic::FileTooLarge {
                    path: entry.path.clone(),
                    size: text.len() as u64,
                    max: MAX_FILE_SIZE,
                });
            }
            Ok(text) => sources.push(LoadedSource::new(entry.path.clone(), text)),
            Err(err) => {
                tracing::warn!(path = %entry.path, error = %err, "failed to read source file");
                diagnostics.push(Diagnostic::ReadFailed {
                    path: entry.path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    sources
}

/// One successfully parsed file.
pub struct ParsedFile<'a> {
    pub path: String,
    pub kind: SourceKind,
    pub source_text: &'a str,
    pub program: Program<'a>,
}

/// Parsed ASTs keyed by repo-relative path.
pub struct AstCache<'a> {
    files: BTreeMap<String, ParsedFile<'a>>,
}

impl<'a> AstCache<'a> {
    /// Parse `sources` into `allocator`.
    ///
    /// A file the parser gives up on is left out of the cache; one with
    /// recoverable errors is kept as parsed. Both are reported.
    pub fn build(
        allocator: &'a Allocator,
        sources: impl IntoIterator<Item = LoadedSource>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut files = BTreeMap::new();

        for source in sources {
            let kind = SourceKind::from_path(&source.path);
            let source_text: &'a str = allocator.alloc_str(&source.text);
            let source_type = oxc_source_type(kind, &source.path);
            let ret = Parser::new(allocator, source_text, source_type).parse();

            if ret.panicked {
                let message = ret
                    .errors
                    .first()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unrecoverable syntax error".to_string());
                tracing::warn!(path = %source.path, error = %message, "failed to parse file");
                diagnostics.push(Diagnostic::ParseFailed {
                    path: source.path,
                    message,
                });
                continue;
            }

            if let Some(first) = ret.errors.first() {
                tracing::debug!(
                    path = %source.path,
                    count = ret.errors.len(),
                    "parsed with recoverable errors"
                );
                diagnostics.push(Diagnostic::RecoverableParseErrors {
                    path: source.path.clone(),
                    count: ret.errors.len(),
                    first: first.to_string(),
                });
            }

            files.insert(
                source.path.clone(),
                ParsedFile {
                    path: source.path,
                    kind,
                    source_text,
                    program: ret.program,
                },
            );
        }

        Self { files }
    }

    pub fn get(&self, path: &str) -> Option<&ParsedFile<'a>> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Parsed files in path order.
    pub fn iter(&self) -> impl Iterator<Item = &ParsedFile<'a>> {
        self.files.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Map our classification onto the parser's source type.
fn oxc_source_type(kind: SourceKind, path: &str) -> OxcSourceType {
    match kind {
        SourceKind::JavaScript => OxcSourceType::from_path(path)
            .unwrap_or_else(|_| OxcSourceType::mjs())
            .with_jsx(true),
        SourceKind::TypeScript => {
            OxcSourceType::from_path(path).unwrap_or_else(|_| OxcSourceType::ts())
        }
        SourceKind::Jsx => OxcSourceType::jsx(),
        SourceKind::Tsx => OxcSourceType::tsx(),
        _ => OxcSourceType::mjs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn test_build_parses_each_file() {
        let allocator = Allocator::default();
        let mut diagnostics = Diagnostics::new();
        let cache = AstCache::build(
            &allocator,
            vec![
                LoadedSource::new("src/a.ts", "export const a: number = 1;"),
                LoadedSource::new("src/App.tsx", "export const App = () => <div />;"),
                LoadedSource::new("src/legacy.js", "module.exports = {};"),
            ],
            &mut diagnostics,
        );

        assert_eq!(cache.len(), 3);
        assert!(cache.contains("src/App.tsx"));
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.messages());
    }

    #[test]
    fn test_unparseable_file_is_absent() {
        let allocator = Allocator::default();
        let mut diagnostics = Diagnostics::new();
        let cache = AstCache::build(
            &allocator,
            vec![
                LoadedSource::new("src/ok.ts", "export const ok = 1;"),
                LoadedSource::new("src/broken.ts", "export const x = {{{{{ invalid syntax"),
            ],
            &mut diagnostics,
        );

        assert!(cache.contains("src/ok.ts"));
        assert!(!cache.contains("src/broken.ts"));
        assert!(diagnostics.mentions("src/broken.ts"));
    }

    #[tokio::test]
    async fn test_load_sources_skips_non_source_files() {
        let mut index = FileIndex::new();
        index.insert_source("src/a.ts", MemorySource::new("export {}"));
        index.insert_source("styles/site.css", MemorySource::new("body {}"));
        index.insert_source("package.json", MemorySource::new("{}"));

        let mut diagnostics = Diagnostics::new();
        let sources = load_sources(&index, &mut diagnostics).await;

        assert_eq!(sources, vec![LoadedSource::new("src/a.ts", "export {}")]);
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_load_sources_reports_read_failures() {
        let mut index = FileIndex::new();
        index.insert_source(
            "src/gone.ts",
            crate::source::DiskSource::new("/nonexistent/symgraph/gone.ts", 10),
        );

        let mut diagnostics = Diagnostics::new();
        let sources = load_sources(&index, &mut diagnostics).await;

        assert!(sources.is_empty());
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::ReadFailed { path, .. }) if path == "src/gone.ts"
        ));
    }
}
