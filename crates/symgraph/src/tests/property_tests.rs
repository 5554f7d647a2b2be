//! Property-based tests for graph construction and tracing.
//!
//! Run with: cargo test --features proptest --package symgraph property_tests

#![cfg(feature = "proptest")]

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use super::test_helpers::build;
use crate::{AliasMap, Diagnostics, Direction, PathResolver, trace};

/// Random import graphs over `f0.ts .. f{n-1}.ts`.
fn import_graph_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    (1usize..=8).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0..n, 0..=3), n).prop_map(move |imports| {
            imports
                .into_iter()
                .enumerate()
                .map(|(i, targets)| {
                    let mut text = String::new();
                    let unique: FxHashSet<usize> = targets.into_iter().collect();
                    let mut unique: Vec<usize> = unique.into_iter().collect();
                    unique.sort();
                    for t in &unique {
                        text.push_str(&format!("import {{ s{t} as i{t} }} from './f{t}';\n"));
                    }
                    let uses: Vec<String> = unique.iter().map(|t| format!("i{t}")).collect();
                    text.push_str(&format!("export function s{i}() {{ return [{}]; }}\n", uses.join(", ")));
                    (format!("f{i}.ts"), text)
                })
                .collect()
        })
    })
}

fn build_owned(files: &[(String, String)]) -> crate::GraphBuild {
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, t)| (p.as_str(), t.as_str())).collect();
    build(&refs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// B in A.dependencies <=> A in B.dependents
    #[test]
    fn prop_edges_symmetric(files in import_graph_strategy()) {
        let build = build_owned(&files);
        prop_assert!(build.graph.check_symmetry().is_empty());
        prop_assert_eq!(build.graph.files().len(), files.len());
    }

    /// Raising the hop limit never removes files from a trace.
    #[test]
    fn prop_trace_monotonic_in_hops(files in import_graph_strategy(), hops in 0usize..5) {
        let build = build_owned(&files);
        for direction in [Direction::Dependencies, Direction::Dependents, Direction::Both] {
            let smaller: FxHashSet<String> = trace(&build.graph, "f0.ts", direction, hops).into_iter().collect();
            let larger: FxHashSet<String> = trace(&build.graph, "f0.ts", direction, hops + 1).into_iter().collect();
            prop_assert!(smaller.is_subset(&larger));
            prop_assert!(smaller.contains("f0.ts"));
        }
    }

    /// Both-direction traces cover each single direction.
    #[test]
    fn prop_both_covers_each_direction(files in import_graph_strategy(), hops in 0usize..4) {
        let build = build_owned(&files);
        let both: FxHashSet<String> = trace(&build.graph, "f0.ts", Direction::Both, hops).into_iter().collect();
        for direction in [Direction::Dependencies, Direction::Dependents] {
            for file in trace(&build.graph, "f0.ts", direction, hops) {
                prop_assert!(both.contains(&file));
            }
        }
    }

    /// Memoized resolution always agrees with a fresh resolution.
    #[test]
    fn prop_resolution_deterministic(
        dirs in prop::collection::vec("[a-c]{1,2}", 1..=3),
        spec in "(\\./|\\.\\./)?[a-c]{1,2}(/[a-c]{1,2})?",
    ) {
        let from = format!("{}/main.ts", dirs.join("/"));
        let known = [
            from.clone(),
            format!("{}/a.ts", dirs.join("/")),
            "a/index.ts".to_string(),
            "b/c.tsx".to_string(),
        ];
        let mut resolver = PathResolver::new(known.iter().cloned(), &AliasMap::new()).unwrap();
        let mut diags = Diagnostics::new();

        let first = resolver.resolve(&from, &spec, &mut diags);
        let second = resolver.resolve(&from, &spec, &mut diags);
        let fresh = resolver.resolve_uncached(&from, &spec, &mut diags);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
    }
}
