//! The file index consumed by graph construction.
//!
//! The index is produced by whoever scans the project (the CLI walks the disk,
//! tests build it in memory). The core only reads it: it asks each entry for
//! its text once, while building the AST cache.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::{Error, Result};

/// Lazily fetched contents of one indexed file.
#[async_trait]
pub trait FileSource: fmt::Debug + Send + Sync {
    /// Size of the file in bytes, as known when the index was built.
    fn size(&self) -> u64;

    /// Fetch the file as UTF-8 text.
    async fn text(&self) -> Result<String>;

    /// Fetch the raw file contents.
    async fn bytes(&self) -> Result<Vec<u8>>;
}

/// In-memory file contents.
#[derive(Debug, Clone)]
pub struct MemorySource {
    text: Arc<str>,
}

impl MemorySource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl FileSource for MemorySource {
    fn size(&self) -> u64 {
        self.text.len() as u64
    }

    async fn text(&self) -> Result<String> {
        Ok(self.text.to_string())
    }

    async fn bytes(&self) -> Result<Vec<u8>> {
        Ok(self.text.as_bytes().to_vec())
    }
}

/// File contents read from disk on demand.
#[derive(Debug, Clone)]
pub struct DiskSource {
    path: PathBuf,
    size: u64,
}

impl DiskSource {
    /// Create a source for `path` whose size was already observed by the scanner.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for DiskSource {
    fn size(&self) -> u64 {
        self.size
    }

    async fn text(&self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            path: self.path.display().to_string(),
        })
    }

    async fn bytes(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// One entry of the file index.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Repo-relative, forward-slash path.
    pub path: String,
    pub size: u64,
    pub source: Arc<dyn FileSource>,
}

impl FileEntry {
    pub fn kind(&self) -> SourceKind {
        SourceKind::from_path(&self.path)
    }
}

/// Mapping from repo-relative path to file entry.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: BTreeMap<String, FileEntry>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source under `path`. The path is normalized to forward slashes
    /// without a leading `./`.
    pub fn insert_source(&mut self, path: impl AsRef<str>, source: impl FileSource + 'static) {
        let path = normalize_index_path(path.as_ref());
        let size = source.size();
        self.entries.insert(
            path.clone(),
            FileEntry {
                path,
                size,
                source: Arc::new(source),
            },
        );
    }

    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    /// Every indexed path, in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total size of every indexed file in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|e| e.size).sum()
    }
}

fn normalize_index_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").unwrap_or(&path).to_string()
}

/// Source classification derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Json,
    Css,
    Unknown,
}

impl SourceKind {
    /// Derive the kind from a file extension string.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "mts" | "cts" => Self::TypeScript,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "json" => Self::Json,
            "css" => Self::Css,
            _ => Self::Unknown,
        }
    }

    /// Infer the kind from a path.
    pub fn from_path(path: &str) -> Self {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Whether files of this kind are parsed into the AST cache.
    pub fn is_parseable(&self) -> bool {
        matches!(
            self,
            Self::JavaScript | Self::TypeScript | Self::Jsx | Self::Tsx
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(SourceKind::from_path("src/a.ts"), SourceKind::TypeScript);
        assert_eq!(SourceKind::from_path("src/a.d.ts"), SourceKind::TypeScript);
        assert_eq!(SourceKind::from_path("src/App.tsx"), SourceKind::Tsx);
        assert_eq!(SourceKind::from_path("lib/x.cjs"), SourceKind::JavaScript);
        assert_eq!(SourceKind::from_path("package.json"), SourceKind::Json);
        assert_eq!(SourceKind::from_path("README"), SourceKind::Unknown);
        assert!(!SourceKind::Css.is_parseable());
        assert!(SourceKind::Jsx.is_parseable());
    }

    #[test]
    fn test_index_normalizes_paths() {
        let mut index = FileIndex::new();
        index.insert_source("./src\\a.ts", MemorySource::new("export {}"));

        assert!(index.contains("src/a.ts"));
        assert_eq!(index.get("src/a.ts").map(|e| e.size), Some(9));
        assert_eq!(index.total_size(), 9);
    }

    #[tokio::test]
    async fn test_disk_source_reads_text() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("a.ts");
        std::fs::write(&path, "export const a = 1;").unwrap();

        let source = DiskSource::new(&path, 19);
        assert_eq!(source.text().await.unwrap(), "export const a = 1;");
        assert_eq!(source.bytes().await.unwrap().len(), 19);
    }

    #[tokio::test]
    async fn test_disk_source_rejects_invalid_utf8() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bin.js");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let source = DiskSource::new(&path, 3);
        assert!(matches!(
            source.text().await,
            Err(Error::InvalidUtf8 { .. })
        ));
    }
}
