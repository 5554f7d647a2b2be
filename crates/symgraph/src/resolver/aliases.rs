//! Path alias handling for module resolution.
//!
//! An alias is a prefix substitution such as `"@core" -> "packages/core/src"`.
//! Each alias target also defines a package root (`packages/core`), which is
//! what relative imports are not allowed to leave.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::algorithm::normalize;
use crate::{Error, Result};

/// Mapping from alias prefix to target path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap {
    entries: BTreeMap<String, String>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(alias.into(), target.into());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add every alias of `other` that is not already present.
    pub fn merge_missing(&mut self, other: &AliasMap) {
        for (alias, target) in other.iter() {
            self.entries
                .entry(alias.to_string())
                .or_insert_with(|| target.to_string());
        }
    }
}

impl<A: Into<String>, T: Into<String>> FromIterator<(A, T)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (A, T)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(a, t)| (a.into(), t.into()))
                .collect(),
        }
    }
}

/// A validated alias, ready for matching.
#[derive(Debug, Clone)]
pub(crate) struct Alias {
    prefix: String,
    target: String,
}

impl Alias {
    /// Return the part of `specifier` after this alias, if it matches.
    ///
    /// `@core` matches `@core` and `@core/x` but not `@corelib`. A prefix that
    /// already ends in `/` matches anything it starts.
    fn strip<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        let rest = specifier.strip_prefix(self.prefix.as_str())?;
        if self.prefix.ends_with('/') || rest.is_empty() {
            return Some(rest);
        }
        rest.strip_prefix('/')
    }

    /// Directory containing the alias target (`packages/core/src` -> `packages/core`).
    fn package_root(&self) -> Option<String> {
        let (root, _) = self.target.rsplit_once('/')?;
        (!root.is_empty()).then(|| root.to_string())
    }
}

/// Alias table with its derived package roots.
#[derive(Debug, Clone, Default)]
pub(crate) struct AliasTable {
    /// Sorted longest prefix first.
    aliases: Vec<Alias>,
    /// Sorted longest root first.
    package_roots: Vec<String>,
}

impl AliasTable {
    pub(crate) fn new(map: &AliasMap) -> Result<Self> {
        let mut aliases = Vec::with_capacity(map.len());
        for (prefix, target) in map.iter() {
            if prefix.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "alias for '{target}' has an empty prefix"
                )));
            }
            let target = normalize(target.trim_start_matches('/'));
            if target.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "alias '{prefix}' has an empty target"
                )));
            }
            aliases.push(Alias {
                prefix: prefix.to_string(),
                target,
            });
        }
        aliases.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        let mut package_roots: Vec<String> =
            aliases.iter().filter_map(Alias::package_root).collect();
        package_roots.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        package_roots.dedup();

        Ok(Self {
            aliases,
            package_roots,
        })
    }

    /// Substitute the longest matching alias and normalize the result.
    pub(crate) fn substitute(&self, specifier: &str) -> Option<String> {
        self.aliases.iter().find_map(|alias| {
            let rest = alias.strip(specifier)?;
            let joined = if rest.is_empty() {
                alias.target.clone()
            } else {
                format!("{}/{rest}", alias.target)
            };
            Some(normalize(&joined))
        })
    }

    /// The package root containing `path`, if any.
    pub(crate) fn package_root_of(&self, path: &str) -> Option<&str> {
        self.package_roots
            .iter()
            .find(|root| {
                path.strip_prefix(root.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .map(String::as_str)
    }

    pub(crate) fn package_roots(&self) -> impl Iterator<Item = &str> {
        self.package_roots.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> AliasTable {
        AliasTable::new(&pairs.iter().copied().collect()).unwrap()
    }

    #[test]
    fn test_substitute_alias() {
        let table = table(&[("@core", "packages/core/src")]);

        assert_eq!(
            table.substitute("@core/utils/math"),
            Some("packages/core/src/utils/math".to_string())
        );
        assert_eq!(table.substitute("@core"), Some("packages/core/src".to_string()));
        assert_eq!(table.substitute("@corelib/x"), None);
        assert_eq!(table.substitute("react"), None);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = table(&[("@app", "src"), ("@app/ui", "packages/ui/src")]);

        assert_eq!(
            table.substitute("@app/ui/Button"),
            Some("packages/ui/src/Button".to_string())
        );
        assert_eq!(
            table.substitute("@app/main"),
            Some("src/main".to_string())
        );
    }

    #[test]
    fn test_slash_terminated_prefix_and_dot_segments() {
        let table = table(&[("@/", "./src/")]);

        assert_eq!(
            table.substitute("@/components/../lib/x"),
            Some("src/lib/x".to_string())
        );
    }

    #[test]
    fn test_package_roots() {
        let table = table(&[("@a", "packages/a/src"), ("@b", "packages/b/src")]);

        assert_eq!(table.package_root_of("packages/a/src/x.ts"), Some("packages/a"));
        assert_eq!(table.package_root_of("packages/b/src/y"), Some("packages/b"));
        assert_eq!(table.package_root_of("packages/ab/src/y"), None);
        assert_eq!(table.package_root_of("scripts/build.ts"), None);
        assert_eq!(table.package_roots().count(), 2);
    }

    #[test]
    fn test_invalid_aliases_are_rejected() {
        let empty_prefix: AliasMap = [("", "src")].into_iter().collect();
        assert!(matches!(
            AliasTable::new(&empty_prefix),
            Err(Error::InvalidConfig(_))
        ));

        let empty_target: AliasMap = [("@x", "./")].into_iter().collect();
        assert!(AliasTable::new(&empty_target).is_err());
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut base: AliasMap = [("@core", "packages/core/src")].into_iter().collect();
        let other: AliasMap = [("@core", "elsewhere"), ("@ui", "packages/ui/src")]
            .into_iter()
            .collect();
        base.merge_missing(&other);

        assert_eq!(base.get("@core"), Some("packages/core/src"));
        assert_eq!(base.get("@ui"), Some("packages/ui/src"));
    }
}
