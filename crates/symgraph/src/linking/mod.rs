//! Dependency linking: edges from importers to the symbols they use.
//!
//! Every resolved import gets a file-level edge from the importing file to the
//! node that originates the export, after following re-export chains. Uses of
//! the import inside a named declaration additionally get an edge from that
//! declaration's node. Namespace, side-effect, re-export and literal dynamic
//! imports link whole files.
//!
//! Each file's edges are planned against a read-only graph and applied only
//! when the walk finished, so a file that fails part way adds nothing.

mod exports;
mod references;

pub use exports::{ExportResolver, ImportBinding, ImportedName, ModuleExports};
pub use references::{BindingUse, References, collect_references};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast_cache::{AstCache, ParsedFile};
use crate::diagnostics::{Diagnostics, Pass, isolate};
use crate::graph::SymbolGraph;
use crate::node::NodeId;
use crate::resolver::PathResolver;

/// Counts reported by [`link_dependencies`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    /// Files whose edges were applied.
    pub files: usize,
    /// Edges newly added to the graph.
    pub edges: usize,
}

/// Add dependency edges for every file in `cache`.
///
/// Nodes must already exist; see [`crate::discovery::discover_symbols`].
pub fn link_dependencies(
    graph: &mut SymbolGraph,
    cache: &AstCache<'_>,
    resolver: &mut PathResolver,
    diagnostics: &mut Diagnostics,
) -> LinkSummary {
    let tables = export_tables(cache, diagnostics);
    let mut summary = LinkSummary::default();
    let edges_before = graph.edge_count();

    for file in cache.iter() {
        let Some(table) = tables.get(&file.path) else {
            continue;
        };

        let planned = {
            let view: &SymbolGraph = graph;
            let exports = ExportResolver::new(view, &tables);
            isolate(Pass::Linking, &file.path, diagnostics, |diagnostics| {
                plan_file(view, &exports, resolver, diagnostics, file, table)
            })
        };
        let Some(edges) = planned else {
            continue;
        };

        for (from, to) in &edges {
            graph.add_edge(from, to);
        }
        summary.files += 1;
    }
    summary.edges = graph.edge_count() - edges_before;

    tracing::debug!(
        files = summary.files,
        edges = summary.edges,
        resolved = resolver.cached_len(),
        "dependency linking finished"
    );
    summary
}

/// Import/export tables for every file, built up front so re-export chains
/// can be followed into any module.
fn export_tables(
    cache: &AstCache<'_>,
    diagnostics: &mut Diagnostics,
) -> FxHashMap<String, ModuleExports> {
    let mut tables = FxHashMap::default();
    for file in cache.iter() {
        if let Some(table) = isolate(Pass::Linking, &file.path, diagnostics, |_| {
            ModuleExports::from_program(&file.program)
        }) {
            tables.insert(file.path.clone(), table);
        }
    }
    tables
}

/// Edges contributed by one file, in a deterministic order.
fn plan_file(
    graph: &SymbolGraph,
    exports: &ExportResolver<'_>,
    resolver: &mut PathResolver,
    diagnostics: &mut Diagnostics,
    file: &ParsedFile<'_>,
    table: &ModuleExports,
) -> Vec<(NodeId, NodeId)> {
    let file_node = NodeId::file(file.path.as_str());
    let mut edges = Vec::new();
    let mut seen = FxHashSet::default();
    let mut push = |from: NodeId, to: NodeId| {
        if from != to && seen.insert((from.clone(), to.clone())) {
            edges.push((from, to));
        }
    };

    let mut bindings: Vec<(&String, &ImportBinding)> = table.imports.iter().collect();
    bindings.sort_by(|a, b| a.0.cmp(b.0));

    let mut origins: FxHashMap<&str, NodeId> = FxHashMap::default();
    for (local, binding) in bindings {
        let Some(origin) = exports.resolve_binding(resolver, diagnostics, &file.path, binding)
        else {
            continue;
        };
        push(file_node.clone(), origin.clone());
        origins.insert(local.as_str(), origin);
    }

    let file_specifiers = table
        .side_effect_imports
        .iter()
        .chain(&table.reexport_sources);
    for specifier in file_specifiers {
        if let Some(target) = resolver.resolve(&file.path, specifier, diagnostics) {
            push(file_node.clone(), NodeId::file(target));
        }
    }

    let names: FxHashSet<String> = origins.keys().map(|name| name.to_string()).collect();
    let references = collect_references(&file.program, &names);

    let mut uses: Vec<&BindingUse> = references.uses.iter().collect();
    uses.sort_by(|a, b| (&a.enclosing, &a.binding).cmp(&(&b.enclosing, &b.binding)));
    for BindingUse { binding, enclosing } in uses {
        let (Some(enclosing), Some(origin)) = (enclosing, origins.get(binding.as_str())) else {
            continue;
        };
        let from = NodeId::symbol(file.path.as_str(), enclosing.as_str());
        if graph.contains(&from) {
            push(from, origin.clone());
        }
    }

    for specifier in &references.dynamic_imports {
        if let Some(target) = resolver.resolve(&file.path, specifier, diagnostics) {
            push(file_node.clone(), NodeId::file(target));
        }
    }

    edges
}
