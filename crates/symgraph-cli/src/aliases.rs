//! Path aliases from `tsconfig.json`.
//!
//! Only wildcard mappings translate to prefix aliases:
//! `"@core/*": ["packages/core/src/*"]` becomes `@core -> packages/core/src`,
//! with the target taken relative to `compilerOptions.baseUrl`. Exact
//! mappings and catch-all `"*"` entries are skipped. A tsconfig that cannot be
//! read or parsed only produces a warning.

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use json_comments::CommentSettings;
use path_clean::PathClean;
use serde::Deserialize;
use symgraph::AliasMap;

use crate::scan::relative_path;

pub const DEFAULT_TSCONFIG: &str = "tsconfig.json";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

/// Read aliases from `tsconfig` (relative to `root`), or from
/// `tsconfig.json` in `root` when none is configured.
///
/// A configured tsconfig that is missing is warned about; a missing default
/// one is silently skipped.
pub fn discover_aliases(root: &Path, tsconfig: Option<&Path>) -> AliasMap {
    let (path, explicit) = match tsconfig {
        Some(path) => (root.join(path), true),
        None => (root.join(DEFAULT_TSCONFIG), false),
    };
    if !explicit && !path.is_file() {
        return AliasMap::new();
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not read tsconfig; no aliases loaded from it"
            );
            return AliasMap::new();
        }
    };
    let config = match parse_tsconfig(&text) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not parse tsconfig; no aliases loaded from it"
            );
            return AliasMap::new();
        }
    };

    let config_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let aliases = aliases_from_paths(root, &config_dir, &config.compiler_options);
    tracing::debug!(path = %path.display(), aliases = aliases.len(), "tsconfig aliases loaded");
    aliases
}

fn aliases_from_paths(root: &Path, config_dir: &Path, options: &CompilerOptions) -> AliasMap {
    let base: PathBuf = config_dir.join(options.base_url.as_deref().unwrap_or("."));
    let mut aliases = AliasMap::new();

    for (pattern, targets) in &options.paths {
        let Some(prefix) = pattern.strip_suffix("/*") else {
            tracing::debug!(pattern, "skipping non-wildcard tsconfig path");
            continue;
        };
        if prefix.is_empty() {
            continue;
        }
        let Some(target) = targets.iter().find_map(|t| t.strip_suffix("/*")) else {
            tracing::debug!(pattern, "skipping tsconfig path without a wildcard target");
            continue;
        };

        let absolute = base.join(target).clean();
        match relative_path(root, &absolute) {
            Some(rel) => aliases.insert(prefix, rel),
            None => {
                tracing::warn!(pattern, target, "tsconfig path points outside the project root");
            }
        }
    }
    aliases
}

/// Parse tsconfig's relaxed JSON: comments are blanked out, then trailing
/// commas dropped.
fn parse_tsconfig(text: &str) -> io::Result<TsConfig> {
    let mut json = String::with_capacity(text.len());
    CommentSettings::c_style()
        .strip_comments(text.as_bytes())
        .read_to_string(&mut json)?;
    Ok(serde_json::from_str(&strip_trailing_commas(&json))?)
}

/// Drop commas directly followed by `}` or `]`, leaving string literals alone.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        if c == ',' {
            let next = chars.clone().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        in_string = c == '"';
        out.push(c);
    }
    out
}
