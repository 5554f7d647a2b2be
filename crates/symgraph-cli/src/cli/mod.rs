//! Command-line interface definition.
//!
//! - `symgraph build` - build the graph and report statistics and diagnostics
//! - `symgraph trace` - list the files reachable from a file or symbol

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, Command, DirectionArg, ProjectArgs, TraceArgs};

/// symgraph - symbol-level dependency graphs for JavaScript/TypeScript
#[derive(Parser, Debug)]
#[command(
    name = "symgraph",
    version,
    about = "Symbol-level dependency graphs for JavaScript/TypeScript",
    long_about = "symgraph parses every JavaScript/TypeScript file in a project, links each\n\
                  import to the declaration it names, and answers bounded reachability\n\
                  questions such as \"which files are within two hops of src/app.ts?\"."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
