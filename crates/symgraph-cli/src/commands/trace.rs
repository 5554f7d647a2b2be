//! `symgraph trace`: files reachable from a start node.

use symgraph::{GraphSession, RebuildOutcome};

use super::Project;
use crate::cli::TraceArgs;
use crate::config::ConfigOverrides;
use crate::error::{CliError, Result};
use crate::ui;

pub async fn execute(args: TraceArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        direction: args.direction.map(Into::into),
        max_hops: args.max_hops,
    };
    let project = Project::open(&args.project, &overrides)?;
    let index = project.scan()?;

    let session = GraphSession::new(project.aliases.clone());
    match session.rebuild(&index).await {
        RebuildOutcome::Built { diagnostics } if diagnostics > 0 => {
            tracing::info!(
                diagnostics,
                "graph built with diagnostics; run `symgraph build` to list them"
            );
        }
        RebuildOutcome::Built { .. } => {}
        RebuildOutcome::Failed(error) => return Err(CliError::Custom(error)),
        RebuildOutcome::AlreadyBuilding => {
            return Err(CliError::Custom("a graph build is already running".into()));
        }
    }

    let start = project.normalize_start(&args.start);
    let trace = session.trace(&start, project.config.direction, project.config.max_hops)?;

    if args.project.json {
        ui::print_json(&trace)?;
    } else {
        ui::print_trace(&trace);
    }
    Ok(())
}
