//! Library half of the `symgraph` binary.
//!
//! Everything the binary does lives here so integration tests can drive the
//! commands directly:
//!
//! - [`scan`] walks a project directory into a [`symgraph::FileIndex`]
//! - [`aliases`] reads path aliases out of `tsconfig.json`
//! - [`config`] layers defaults, `symgraph.json`, environment and flags
//! - [`commands`] runs `build` and `trace` and prints the results via [`ui`]

pub mod aliases;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod scan;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
