//! symgraph CLI - symbol-level dependency graphs for JavaScript/TypeScript.
//!
//! Parses arguments, sets up logging and dispatches to a command.

use clap::Parser;
use miette::Result;
use symgraph_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Trace(trace_args) => commands::trace_execute(trace_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
