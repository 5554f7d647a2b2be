//! Command implementations.
//!
//! Both commands open a [`Project`] (root, layered config, aliases), scan it
//! and build a graph; they differ in what they print.

pub mod build;
pub mod trace;

pub use build::execute as build_execute;
pub use trace::execute as trace_execute;

use std::path::{Path, PathBuf};

use symgraph::{AliasMap, FileIndex};

use crate::aliases::discover_aliases;
use crate::cli::ProjectArgs;
use crate::config::{ConfigOverrides, SymgraphConfig};
use crate::error::{CliError, Result, ResultExt};
use crate::scan::{relative_path, scan_project};

/// A project directory with its resolved configuration.
#[derive(Debug, Clone)]
pub struct Project {
    /// Canonical project root.
    pub root: PathBuf,
    pub config: SymgraphConfig,
    /// Configured aliases, completed with those from tsconfig.
    pub aliases: AliasMap,
}

impl Project {
    pub fn open(args: &ProjectArgs, overrides: &ConfigOverrides) -> Result<Self> {
        let requested = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let root = requested.canonicalize().with_path(&requested)?;
        if !root.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "{} is not a directory",
                requested.display()
            )));
        }

        let config = SymgraphConfig::load(&root, args.config.as_deref(), overrides)?;
        let mut aliases = config.aliases.clone();
        aliases.merge_missing(&discover_aliases(&root, config.tsconfig.as_deref()));

        tracing::debug!(
            root = %root.display(),
            aliases = aliases.len(),
            excludes = config.exclude.len(),
            "project opened"
        );
        Ok(Self {
            root,
            config,
            aliases,
        })
    }

    pub fn scan(&self) -> Result<FileIndex> {
        scan_project(&self.root, &self.config.exclude)
    }

    /// Turn a user-supplied start into a graph key.
    ///
    /// Accepts `./`-prefixed, backslash-separated and absolute paths under the
    /// root; a `#symbol` suffix is kept as is.
    pub fn normalize_start(&self, start: &str) -> String {
        let (file, symbol) = match start.split_once('#') {
            Some((file, symbol)) => (file, Some(symbol)),
            None => (start, None),
        };

        let path = Path::new(file);
        let file = if path.is_absolute() {
            relative_path(&self.root, path).unwrap_or_else(|| file.to_string())
        } else {
            file.replace('\\', "/")
        };
        let mut file = file.as_str();
        while let Some(rest) = file.strip_prefix("./") {
            file = rest;
        }

        match symbol {
            Some(symbol) => format!("{file}#{symbol}"),
            None => file.to_string(),
        }
    }
}
