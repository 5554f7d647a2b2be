//! In-memory symbol graph.
//!
//! A `FxHashMap` from [`NodeId`] to [`SymbolNode`]. Every edge is stored twice,
//! once in the source's `dependencies` and once in the target's `dependents`,
//! and both halves are written by the same call.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

use crate::node::{NodeId, SymbolKind, SymbolNode};

/// Mapping from node id to node, plus the edges between them.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    nodes: HashMap<NodeId, SymbolNode>,
}

/// Summary counts for a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub file_nodes: usize,
    pub symbol_nodes: usize,
    pub edges: usize,
    /// Edges whose source is a symbol rather than a file.
    pub symbol_edges: usize,
}

impl SymbolGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the file-level node for `path` exists.
    pub fn ensure_file_node(&mut self, path: &str) -> &SymbolNode {
        let id = NodeId::file(path);
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| SymbolNode::new(id, SymbolKind::File))
    }

    /// Ensure a symbol node exists. Re-declaring a name keeps the first kind.
    pub fn ensure_symbol_node(&mut self, path: &str, name: &str, kind: SymbolKind) -> &SymbolNode {
        self.ensure_file_node(path);
        let id = NodeId::symbol(path, name);
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| SymbolNode::new(id, kind))
    }

    /// Add the edge `from -> to`, updating both endpoints.
    ///
    /// Returns `false` and leaves the graph untouched if either node is missing.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId) -> bool {
        if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            return false;
        }

        if let Some(source) = self.nodes.get_mut(from) {
            source.dependencies.insert(to.clone());
        }
        if let Some(target) = self.nodes.get_mut(to) {
            target.dependents.insert(from.clone());
        }
        true
    }

    pub fn get(&self, id: &NodeId) -> Option<&SymbolNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `from -> to` is recorded.
    pub fn has_edge(&self, from: &NodeId, to: &NodeId) -> bool {
        self.nodes
            .get(from)
            .is_some_and(|node| node.dependencies.contains(to))
    }

    /// Iterate over every node (unordered).
    pub fn nodes(&self) -> impl Iterator<Item = &SymbolNode> {
        self.nodes.values()
    }

    /// Every node owned by `path`: its file node and all of its symbols.
    pub fn nodes_in_file<'g>(&'g self, path: &'g str) -> impl Iterator<Item = &'g SymbolNode> + 'g {
        self.nodes
            .values()
            .filter(move |node| node.file_path() == path)
    }

    /// Paths of every file node, sorted.
    pub fn files(&self) -> BTreeSet<&str> {
        self.nodes
            .keys()
            .filter(|id| id.is_file())
            .map(NodeId::file_path)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.dependencies.len()).sum()
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics::default();
        for node in self.nodes.values() {
            if node.id.is_file() {
                stats.file_nodes += 1;
            } else {
                stats.symbol_nodes += 1;
                stats.symbol_edges += node.dependencies.len();
            }
            stats.edges += node.dependencies.len();
        }
        stats
    }

    /// Edges recorded on only one side, as `(from, to)` pairs.
    ///
    /// Always empty for graphs built through [`SymbolGraph::add_edge`].
    pub fn check_symmetry(&self) -> Vec<(NodeId, NodeId)> {
        let mut broken = Vec::new();
        for node in self.nodes.values() {
            for dep in &node.dependencies {
                let mirrored = self
                    .nodes
                    .get(dep)
                    .is_some_and(|target| target.dependents.contains(&node.id));
                if !mirrored {
                    broken.push((node.id.clone(), dep.clone()));
                }
            }
            for dependent in &node.dependents {
                let mirrored = self
                    .nodes
                    .get(dependent)
                    .is_some_and(|source| source.dependencies.contains(&node.id));
                if !mirrored {
                    broken.push((dependent.clone(), node.id.clone()));
                }
            }
        }
        broken
    }

    /// Nodes sorted by id, for stable output.
    pub fn sorted_nodes(&self) -> Vec<&SymbolNode> {
        let mut nodes: Vec<&SymbolNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }
}

impl Serialize for SymbolGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted_nodes())
    }
}
