//! Hop-limit and direction tests over a linear import chain.

use super::test_helpers::*;
use crate::{Direction, GraphBuild, trace, trace_with_distances};

fn chain_graph() -> GraphBuild {
    let files = chain(4);
    build(&as_refs(&files))
}

#[test]
fn test_hop_limit_boundary() {
    let build = chain_graph();

    assert_eq!(
        trace(&build.graph, "f1.ts", Direction::Dependencies, 0),
        vec!["f1.ts"]
    );
    assert_eq!(
        trace(&build.graph, "f1.ts", Direction::Dependencies, 1),
        vec!["f1.ts", "f2.ts"]
    );
    assert_eq!(
        trace(&build.graph, "f1.ts", Direction::Dependencies, 2),
        vec!["f1.ts", "f2.ts", "f3.ts"]
    );
}

#[test]
fn test_dependents_direction() {
    let build = chain_graph();

    assert_eq!(
        trace(&build.graph, "f4.ts", Direction::Dependents, 2),
        vec!["f2.ts", "f3.ts", "f4.ts"]
    );
    assert_eq!(
        trace(&build.graph, "f1.ts", Direction::Dependents, 3),
        vec!["f1.ts"]
    );
}

#[test]
fn test_both_directions() {
    let build = chain_graph();

    assert_eq!(
        trace(&build.graph, "f2.ts", Direction::Both, 1),
        vec!["f1.ts", "f2.ts", "f3.ts"]
    );
}

#[test]
fn test_unknown_start_is_empty() {
    let build = chain_graph();

    assert!(trace(&build.graph, "nonexistent.ts", Direction::Both, 5).is_empty());
    assert!(trace(&build.graph, "nonexistent.ts#x", Direction::Both, 5).is_empty());
}

#[test]
fn test_symbol_start_and_distances() {
    let build = chain_graph();

    let trace = trace_with_distances(&build.graph, "f1.ts#v1", Direction::Dependencies, 10);
    assert_eq!(trace.files.get("f1.ts"), Some(&0));
    assert_eq!(trace.files.get("f2.ts"), Some(&1));
    assert_eq!(trace.files.get("f4.ts"), Some(&3));
    assert_eq!(trace.paths().len(), 4);
}
