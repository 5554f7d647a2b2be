//! # symgraph
//!
//! Symbol-level dependency graphs for JavaScript/TypeScript codebases.
//!
//! The crate turns a set of source files into a directed graph whose nodes are
//! files and the named declarations inside them, then answers bounded
//! reachability questions ("what does `src/app.ts` depend on within two hops,
//! and what depends on it?").
//!
//! ## Architecture
//!
//! ```text
//!  FileIndex ──► load_sources ──► AstCache ──► discovery ──► linking ──► SymbolGraph
//!                 (async I/O)     (oxc AST)    (nodes)       (edges)         │
//!                                                  ▲             ▲           ▼
//!                                                  └─ PathResolver ┘       tracer
//! ```
//!
//! - [`resolver`] maps an import specifier to a file in the index, honoring
//!   alias tables and rejecting relative imports that cross package roots.
//! - [`ast_cache`] parses every source file once into an arena-backed AST.
//! - [`discovery`] creates one node per file and per declared symbol.
//! - [`linking`] walks imports, follows re-export chains to the declaring
//!   module, and records file-level and symbol-level edges.
//! - [`builder`] sequences the passes and owns the graph while they run.
//! - [`tracer`] performs a hop-limited breadth-first search over the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use symgraph::{build_graph, trace, AliasMap, Direction, FileIndex, MemorySource};
//!
//! # async fn run() -> symgraph::Result<()> {
//! let mut index = FileIndex::new();
//! index.insert_source("src/a.ts", MemorySource::new("import { b } from './b';"));
//! index.insert_source("src/b.ts", MemorySource::new("export const b = 1;"));
//!
//! let build = build_graph(&index, &AliasMap::new()).await?;
//! let files = trace(&build.graph, "src/a.ts", Direction::Dependencies, 1);
//! assert_eq!(files, vec!["src/a.ts", "src/b.ts"]);
//! # Ok(())
//! # }
//! ```
//!
//! Failures that concern a single file (unreadable, unparseable, an illegal
//! cross-package import) never abort a build; they are collected in
//! [`Diagnostics`] next to the graph.

pub mod ast_cache;
pub mod builder;
pub mod diagnostics;
pub mod discovery;
pub mod graph;
pub mod linking;
pub mod node;
pub mod resolver;
pub mod session;
pub mod source;
pub mod tracer;

pub use ast_cache::{AstCache, LoadedSource, MAX_FILE_SIZE, load_sources};
pub use builder::{BuildStats, GraphBuild, GraphBuilder, build_graph, build_graph_from_sources};
pub use diagnostics::{Diagnostic, Diagnostics, Pass};
pub use graph::{GraphStatistics, SymbolGraph};
pub use node::{DEFAULT_EXPORT, FILE_SYMBOL_NAME, NodeId, SymbolKind, SymbolNode};
pub use resolver::{AliasMap, PathResolver};
pub use session::{GraphSession, GraphState, RebuildOutcome, SessionStatus};
pub use source::{DiskSource, FileEntry, FileIndex, FileSource, MemorySource, SourceKind};
pub use tracer::{Direction, Trace, trace, trace_with_distances};

/// Error types for symgraph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration provided (alias table, options).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file is not valid UTF-8.
    #[error("File is not valid UTF-8: {path}")]
    InvalidUtf8 { path: String },

    /// No usable graph is available for tracing.
    #[error("Graph unavailable: {0}")]
    GraphUnavailable(String),
}

/// Result type alias for symgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
