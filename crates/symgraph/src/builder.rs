//! Graph construction pipeline.
//!
//! [`GraphBuilder`] owns the graph, the diagnostics and the resolver for the
//! duration of one build and lends them to each pass in turn:
//! AST cache, then symbol discovery, then dependency linking. Discovery has to
//! finish before linking starts because edges can only join existing nodes.

use std::time::{Duration, Instant};

use oxc_allocator::Allocator;
use serde::Serialize;

use crate::Result;
use crate::ast_cache::{AstCache, LoadedSource, load_sources};
use crate::diagnostics::Diagnostics;
use crate::discovery::discover_symbols;
use crate::graph::{GraphStatistics, SymbolGraph};
use crate::linking::link_dependencies;
use crate::resolver::{AliasMap, PathResolver};
use crate::source::FileIndex;

/// Per-phase counts for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Entries in the file index (0 when built from sources).
    pub files_indexed: usize,
    /// Source texts handed to the parser.
    pub files_loaded: usize,
    /// Files present in the AST cache.
    pub files_parsed: usize,
    /// Files whose declarations were collected.
    pub files_discovered: usize,
    /// Files whose edges were applied.
    pub files_linked: usize,
    pub graph: GraphStatistics,
    #[serde(rename = "elapsedMs", serialize_with = "duration_ms")]
    pub elapsed: Duration,
}

fn duration_ms<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Outcome of a build: the graph plus everything that went wrong on the way.
#[derive(Debug, Clone, Serialize)]
pub struct GraphBuild {
    pub graph: SymbolGraph,
    pub diagnostics: Diagnostics,
    pub stats: BuildStats,
}

/// Sequential single-writer builder.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: SymbolGraph,
    diagnostics: Diagnostics,
    resolver: PathResolver,
    stats: BuildStats,
    started: Instant,
}

impl GraphBuilder {
    /// Create a builder resolving against `known_files`.
    ///
    /// The alias table is validated here; this is the only fatal error a
    /// build can produce.
    pub fn new<I, S>(known_files: I, aliases: &AliasMap) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            graph: SymbolGraph::new(),
            diagnostics: Diagnostics::new(),
            resolver: PathResolver::new(known_files, aliases)?,
            stats: BuildStats::default(),
            started: Instant::now(),
        })
    }

    /// Fetch parseable sources from `index`, recording read failures.
    pub async fn load(&mut self, index: &FileIndex) -> Vec<LoadedSource> {
        self.stats.files_indexed = index.len();
        load_sources(index, &mut self.diagnostics).await
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Run all passes over `sources` and hand back the finished graph.
    pub fn build(mut self, sources: Vec<LoadedSource>) -> GraphBuild {
        self.stats.files_loaded = sources.len();

        let allocator = Allocator::default();
        let cache = AstCache::build(&allocator, sources, &mut self.diagnostics);
        self.stats.files_parsed = cache.len();
        tracing::debug!(
            loaded = self.stats.files_loaded,
            parsed = cache.len(),
            "AST cache built"
        );

        self.stats.files_discovered =
            discover_symbols(&mut self.graph, &cache, &mut self.diagnostics);

        let linked = link_dependencies(
            &mut self.graph,
            &cache,
            &mut self.resolver,
            &mut self.diagnostics,
        );
        self.stats.files_linked = linked.files;
        drop(cache);

        debug_assert!(
            self.graph.check_symmetry().is_empty(),
            "edges recorded on one side only"
        );

        self.stats.graph = self.graph.statistics();
        self.stats.elapsed = self.started.elapsed();

        tracing::info!(
            files = self.stats.graph.file_nodes,
            symbols = self.stats.graph.symbol_nodes,
            edges = self.stats.graph.edges,
            diagnostics = self.diagnostics.len(),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "symbol graph built"
        );

        GraphBuild {
            graph: self.graph,
            diagnostics: self.diagnostics,
            stats: self.stats,
        }
    }
}

/// Build a graph from a file index.
///
/// Every indexed path counts as resolvable, parseable or not; imports of
/// files that were not parsed resolve but produce no edge.
pub async fn build_graph(index: &FileIndex, aliases: &AliasMap) -> Result<GraphBuild> {
    let mut builder = GraphBuilder::new(index.paths(), aliases)?;
    let sources = builder.load(index).await;
    Ok(builder.build(sources))
}

/// Build a graph from already loaded sources, without any I/O.
pub fn build_graph_from_sources(
    sources: Vec<LoadedSource>,
    aliases: &AliasMap,
) -> Result<GraphBuild> {
    let known: Vec<String> = sources.iter().map(|s| s.path.clone()).collect();
    Ok(GraphBuilder::new(known, aliases)?.build(sources))
}
