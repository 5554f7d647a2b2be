use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use symgraph::Direction;

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the symbol graph and report what was found
    ///
    /// Scans the project, parses every JavaScript/TypeScript file and prints
    /// node and edge counts together with any per-file diagnostics.
    Build(BuildArgs),

    /// List files reachable from a file or symbol
    ///
    /// START is a project-relative file path (`src/app.ts`) or a symbol id
    /// (`src/app.ts#render`).
    Trace(TraceArgs),
}

/// Options shared by every command that builds a graph.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root directory
    ///
    /// Defaults to the current directory. Paths in the graph are relative to it.
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to a config file
    ///
    /// Defaults to `symgraph.json` in the project root, if present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// File path or symbol id to start from
    #[arg(value_name = "START")]
    pub start: String,

    /// Which edges to follow [default: dependencies]
    #[arg(short, long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Maximum number of edges to follow [default: 2]
    #[arg(short = 'n', long, value_name = "HOPS")]
    pub max_hops: Option<usize>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Edge direction for `trace`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum DirectionArg {
    /// What the start depends on
    #[value(name = "dependencies", alias = "deps")]
    Dependencies,

    /// What depends on the start
    #[value(name = "dependents", alias = "rdeps")]
    Dependents,

    /// Both of the above
    #[value(name = "both")]
    Both,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Dependencies => Direction::Dependencies,
            DirectionArg::Dependents => Direction::Dependents,
            DirectionArg::Both => Direction::Both,
        }
    }
}
