//! Conversion of CLI errors into `miette` reports.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a report for `main` to print.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Graph(symgraph::Error::InvalidConfig(msg)) => miette::miette!(
            "Invalid alias configuration: {}\n\nHint: Check \"aliases\" in symgraph.json and compilerOptions.paths in tsconfig.json",
            msg
        ),
        CliError::FileNotFound(path) => miette::miette!(
            "File not found: {}\n\nHint: Pass an existing project directory with --root",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_error_gets_hint() {
        let report = cli_error_to_miette(CliError::Graph(symgraph::Error::InvalidConfig(
            "alias prefix is empty".into(),
        )));
        let text = report.to_string();
        assert!(text.contains("alias prefix is empty"));
        assert!(text.contains("Hint:"));
    }

    #[test]
    fn test_other_errors_keep_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("bad".into()));
        assert_eq!(report.to_string(), "Invalid argument: bad");
    }
}
