//! `symgraph build`: build the graph and report on it.

use serde::Serialize;
use symgraph::{BuildStats, Diagnostics, GraphBuild, build_graph};

use super::Project;
use crate::cli::BuildArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;

/// JSON document printed by `build --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport<'a> {
    pub root: String,
    pub stats: &'a BuildStats,
    pub diagnostics: &'a Diagnostics,
}

pub async fn execute(args: BuildArgs) -> Result<()> {
    let project = Project::open(&args.project, &ConfigOverrides::default())?;
    let build = run(&project).await?;

    if args.project.json {
        ui::print_json(&BuildReport {
            root: project.root.display().to_string(),
            stats: &build.stats,
            diagnostics: &build.diagnostics,
        })?;
    } else {
        ui::print_build_summary(&project.root, &build);
    }
    Ok(())
}

/// Scan `project` and build its graph.
pub async fn run(project: &Project) -> Result<GraphBuild> {
    let index = project.scan()?;
    Ok(build_graph(&index, &project.aliases).await?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use symgraph::NodeId;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::ProjectArgs;

    #[tokio::test]
    #[serial]
    async fn test_run_builds_from_disk_with_tsconfig_aliases() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("packages/core/src")).unwrap();
        fs::create_dir_all(root.join("packages/app/src")).unwrap();
        fs::write(
            root.join("tsconfig.json"),
            r#"{ "compilerOptions": { "paths": {
                "@core/*": ["packages/core/src/*"],
                "@app/*": ["packages/app/src/*"]
            } } }"#,
        )
        .unwrap();
        fs::write(root.join("packages/core/src/math.ts"), "export function add() {}").unwrap();
        fs::write(
            root.join("packages/app/src/main.ts"),
            "import { add } from '@core/math';\nexport const total = add();",
        )
        .unwrap();

        let args = ProjectArgs {
            root: Some(root.to_path_buf()),
            ..ProjectArgs::default()
        };
        let project = Project::open(&args, &ConfigOverrides::default()).unwrap();
        let build = run(&project).await.unwrap();

        assert!(build.diagnostics.is_empty());
        assert!(build.graph.has_edge(
            &NodeId::symbol("packages/app/src/main.ts", "total"),
            &NodeId::symbol("packages/core/src/math.ts", "add"),
        ));
    }
}
