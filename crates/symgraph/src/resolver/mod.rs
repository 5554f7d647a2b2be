//! Module resolution against the indexed file set.
//!
//! Resolution is purely lexical: a specifier is rewritten through the alias
//! table or joined onto the importer's directory, then probed against the set
//! of known paths with the usual extension and `index` fallbacks. There are no
//! filesystem calls, so the same inputs always produce the same answer.

mod algorithm;
mod aliases;
mod extensions;

pub use algorithm::{dirname, is_relative, join_relative, normalize};
pub use aliases::AliasMap;
pub use extensions::{EXTENSIONS, candidates, probe, strip_source_extension};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::Result;
use crate::diagnostics::{Diagnostic, Diagnostics};
use aliases::AliasTable;

/// Resolves import specifiers to indexed file paths.
#[derive(Debug)]
pub struct PathResolver {
    known: FxHashSet<String>,
    aliases: AliasTable,
    cache: FxHashMap<(String, String), Option<String>>,
}

impl PathResolver {
    /// Create a resolver over the complete set of indexed paths.
    ///
    /// Fails if the alias table contains an empty prefix or target.
    pub fn new<I, S>(known_files: I, aliases: &AliasMap) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            known: known_files.into_iter().map(Into::into).collect(),
            aliases: AliasTable::new(aliases)?,
            cache: FxHashMap::default(),
        })
    }

    /// Resolve `specifier` as imported from `from`.
    ///
    /// Results (including misses) are memoized per `(from, specifier)`. An
    /// illegal cross-package import is reported to `diagnostics` the first
    /// time it is resolved only.
    pub fn resolve(
        &mut self,
        from: &str,
        specifier: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let key = (from.to_string(), specifier.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let resolved = self.resolve_uncached(from, specifier, diagnostics);
        self.cache.insert(key, resolved.clone());
        resolved
    }

    /// Resolve without consulting or filling the memo cache.
    pub fn resolve_uncached(
        &self,
        from: &str,
        specifier: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        let stripped = strip_source_extension(specifier);

        let candidate = if let Some(aliased) = self.aliases.substitute(stripped) {
            aliased
        } else if is_relative(stripped) {
            let candidate = join_relative(from, stripped);
            if let Some(target) = self.cross_package_target(from, &candidate) {
                tracing::debug!(from, specifier, resolved = %target, "rejecting cross-package relative import");
                diagnostics.push(Diagnostic::IllegalCrossPackageImport {
                    from: from.to_string(),
                    specifier: specifier.to_string(),
                    target,
                });
                return None;
            }
            candidate
        } else {
            tracing::trace!(from, specifier, "treating bare specifier as external");
            return None;
        };

        probe(&candidate, &self.known)
    }

    /// `Some(candidate)` when `from` and `candidate` sit in different known packages.
    fn cross_package_target(&self, from: &str, candidate: &str) -> Option<String> {
        let from_root = self.aliases.package_root_of(from)?;
        let target_root = self.aliases.package_root_of(candidate)?;
        (from_root != target_root).then(|| candidate.to_string())
    }

    /// Whether `path` is in the indexed file set.
    pub fn is_known(&self, path: &str) -> bool {
        self.known.contains(path)
    }

    /// Package roots derived from the alias table, longest first.
    pub fn package_roots(&self) -> impl Iterator<Item = &str> {
        self.aliases.package_roots()
    }

    /// Number of memoized `(from, specifier)` pairs.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
