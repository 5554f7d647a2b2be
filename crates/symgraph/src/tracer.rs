//! Hop-limited reachability over a built graph.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::SymbolGraph;
use crate::node::NodeId;
use crate::{Error, Result};

/// Which edge sets a trace follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// What the start depends on.
    #[default]
    Dependencies,
    /// What depends on the start.
    Dependents,
    Both,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Dependencies => "dependencies",
            Direction::Dependents => "dependents",
            Direction::Both => "both",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dependencies" => Ok(Direction::Dependencies),
            "dependents" => Ok(Direction::Dependents),
            "both" => Ok(Direction::Both),
            other => Err(Error::InvalidConfig(format!(
                "unknown trace direction '{other}' (expected dependencies, dependents or both)"
            ))),
        }
    }
}

/// Files reached by a trace with the fewest hops needed to reach each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub start: String,
    pub direction: Direction,
    pub max_hops: usize,
    pub files: BTreeMap<String, usize>,
}

impl Trace {
    /// Reached file paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// File paths reachable from `start` within `max_hops` edges, sorted.
///
/// `start` is a symbol id when it contains `#`, otherwise a file path whose
/// file node and symbol nodes all seed the search. An unknown start yields an
/// empty list.
pub fn trace(
    graph: &SymbolGraph,
    start: &str,
    direction: Direction,
    max_hops: usize,
) -> Vec<String> {
    trace_with_distances(graph, start, direction, max_hops).paths()
}

/// Like [`trace`], also reporting the hop distance at which each file was first reached.
pub fn trace_with_distances(
    graph: &SymbolGraph,
    start: &str,
    direction: Direction,
    max_hops: usize,
) -> Trace {
    let mut result = Trace {
        start: start.to_string(),
        direction,
        max_hops,
        files: BTreeMap::new(),
    };

    let seeds = start_nodes(graph, start);
    if seeds.is_empty() {
        tracing::debug!(start, "trace start not found in graph");
        return result;
    }

    let mut visited: FxHashSet<&NodeId> = FxHashSet::default();
    let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::new();
    for seed in seeds {
        if visited.insert(seed) {
            queue.push_back((seed, 0));
        }
    }

    while let Some((id, distance)) = queue.pop_front() {
        result
            .files
            .entry(id.file_path().to_string())
            .and_modify(|d| *d = (*d).min(distance))
            .or_insert(distance);

        if distance >= max_hops {
            continue;
        }
        let Some(node) = graph.get(id) else {
            continue;
        };

        let dependencies = matches!(direction, Direction::Dependencies | Direction::Both)
            .then(|| node.dependencies().iter())
            .into_iter()
            .flatten();
        let dependents = matches!(direction, Direction::Dependents | Direction::Both)
            .then(|| node.dependents().iter())
            .into_iter()
            .flatten();

        for next in dependencies.chain(dependents) {
            if visited.insert(next) {
                queue.push_back((next, distance + 1));
            }
        }
    }

    tracing::debug!(
        start,
        %direction,
        max_hops,
        nodes = visited.len(),
        files = result.files.len(),
        "trace finished"
    );
    result
}

fn start_nodes<'g>(graph: &'g SymbolGraph, start: &'g str) -> Vec<&'g NodeId> {
    if start.is_empty() {
        return Vec::new();
    }
    if start.contains('#') {
        let id = NodeId::parse(start);
        return graph.get(&id).map(|node| vec![&node.id]).unwrap_or_default();
    }
    let mut seeds: Vec<&NodeId> = graph.nodes_in_file(start).map(|node| &node.id).collect();
    seeds.sort();
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SymbolKind;

    fn diamond() -> SymbolGraph {
        // a -> b#x, a -> c, b#x -> d, c -> d
        let mut graph = SymbolGraph::new();
        for file in ["a.ts", "b.ts", "c.ts", "d.ts"] {
            graph.ensure_file_node(file);
        }
        graph.ensure_symbol_node("b.ts", "x", SymbolKind::Function);
        graph.add_edge(&NodeId::file("a.ts"), &NodeId::symbol("b.ts", "x"));
        graph.add_edge(&NodeId::file("a.ts"), &NodeId::file("c.ts"));
        graph.add_edge(&NodeId::symbol("b.ts", "x"), &NodeId::file("d.ts"));
        graph.add_edge(&NodeId::file("c.ts"), &NodeId::file("d.ts"));
        graph
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("dependents".parse::<Direction>().unwrap(), Direction::Dependents);
        assert_eq!("BOTH".parse::<Direction>().unwrap(), Direction::Both);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(
            serde_json::to_string(&Direction::Dependencies).unwrap(),
            "\"dependencies\""
        );
    }

    #[test]
    fn test_distances_are_minimal() {
        let graph = diamond();
        let trace = trace_with_distances(&graph, "a.ts", Direction::Dependencies, 5);

        assert_eq!(trace.files.get("a.ts"), Some(&0));
        assert_eq!(trace.files.get("b.ts"), Some(&1));
        assert_eq!(trace.files.get("c.ts"), Some(&1));
        assert_eq!(trace.files.get("d.ts"), Some(&2));
    }

    #[test]
    fn test_symbol_start() {
        let graph = diamond();

        assert_eq!(
            trace(&graph, "b.ts#x", Direction::Both, 1),
            vec!["a.ts", "b.ts", "d.ts"]
        );
        assert!(trace(&graph, "b.ts#missing", Direction::Both, 1).is_empty());
    }

    #[test]
    fn test_file_start_includes_symbols() {
        let graph = diamond();

        // b.ts itself has no edges; its symbol x does.
        assert_eq!(
            trace(&graph, "b.ts", Direction::Dependencies, 1),
            vec!["b.ts", "d.ts"]
        );
    }

    #[test]
    fn test_empty_start() {
        assert!(trace(&diamond(), "", Direction::Both, 3).is_empty());
    }
}
