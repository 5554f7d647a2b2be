//! Configuration with multi-source loading.
//!
//! Priority: CLI flags > `SYMGRAPH_*` environment > `symgraph.json` > defaults.

mod loading;
mod types;

pub use loading::ConfigOverrides;
pub use types::{DEFAULT_MAX_HOPS, SymgraphConfig};
