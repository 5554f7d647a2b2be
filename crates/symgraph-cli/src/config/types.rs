use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use symgraph::{AliasMap, Direction};

pub const DEFAULT_MAX_HOPS: usize = 2;

fn default_max_hops() -> usize {
    DEFAULT_MAX_HOPS
}

/// Settings read from `symgraph.json`, the environment and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SymgraphConfig {
    /// Alias prefix to project-relative target, e.g. `"@core": "packages/core/src"`.
    /// Entries here win over aliases read from `tsconfig.json`.
    #[serde(default)]
    pub aliases: AliasMap,

    /// Extra paths to skip while scanning, in `.gitignore` glob syntax
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// tsconfig to read path aliases from, relative to the project root.
    /// `tsconfig.json` in the root is used when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,

    /// Default direction for `trace`
    #[serde(default)]
    pub direction: Direction,

    /// Default hop limit for `trace`
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

impl Default for SymgraphConfig {
    fn default() -> Self {
        Self {
            aliases: AliasMap::new(),
            exclude: Vec::new(),
            tsconfig: None,
            direction: Direction::default(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}
