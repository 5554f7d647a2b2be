//! Terminal output.
//!
//! Results go to stdout, status lines to stderr. Styling goes through
//! `console`, which drops colors for pipes, `NO_COLOR` and `--no-color`.

use std::path::Path;
use std::time::Duration;

use console::style;
use serde::Serialize;
use symgraph::{GraphBuild, Trace};

use crate::error::Result;

/// Apply `--no-color` to both output streams.
pub fn init_colors(no_color: bool) {
    if no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a duration as `50ms`, `1.50s` or `1m 30s`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

pub fn print_build_summary(root: &Path, build: &GraphBuild) {
    let stats = &build.stats;
    success(&format!(
        "Built symbol graph for {} in {}",
        root.display(),
        format_duration(stats.elapsed)
    ));

    println!(
        "  {:<10}{} ({} parsed)",
        style("files").bold(),
        stats.files_indexed,
        stats.files_parsed
    );
    println!("  {:<10}{}", style("symbols").bold(), stats.graph.symbol_nodes);
    println!(
        "  {:<10}{} ({} from symbols)",
        style("edges").bold(),
        stats.graph.edges,
        stats.graph.symbol_edges
    );

    if build.diagnostics.is_empty() {
        return;
    }
    warning(&plural(build.diagnostics.len(), "diagnostic", "diagnostics"));
    for diagnostic in &build.diagnostics {
        println!("  {} {}", style("-").dim(), diagnostic);
    }
}

pub fn print_trace(trace: &Trace) {
    if trace.is_empty() {
        warning(&format!("'{}' is not in the graph", trace.start));
        return;
    }

    eprintln!(
        "{} {} of {} within {}",
        style("Tracing").bold(),
        trace.direction,
        style(&trace.start).cyan(),
        plural(trace.max_hops, "hop", "hops")
    );

    let width = trace.files.keys().map(|path| path.len()).max().unwrap_or(0);
    for (path, distance) in &trace.files {
        let label = match distance {
            0 => "start".to_string(),
            n => plural(*n, "hop", "hops"),
        };
        println!("{path:<width$}  {}", style(label).dim());
    }
}
