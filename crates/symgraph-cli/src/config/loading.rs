use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
    value::Uncased,
};
use symgraph::Direction;

use super::SymgraphConfig;
use crate::error::{ConfigError, Result};

/// Values given on the command line, applied over every other source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub direction: Option<Direction>,
    pub max_hops: Option<usize>,
}

impl SymgraphConfig {
    pub const FILE_NAME: &'static str = "symgraph.json";
    pub const ENV_PREFIX: &'static str = "SYMGRAPH_";

    /// Load configuration for the project at `root`.
    ///
    /// `config_path` must exist when given; otherwise `symgraph.json` in the
    /// root is used if present.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(root, config_path)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(Self::env());

        if let Some(direction) = overrides.direction {
            figment = figment.merge(Serialized::default("direction", direction));
        }
        if let Some(max_hops) = overrides.max_hops {
            figment = figment.merge(Serialized::default("maxHops", max_hops));
        }

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: "Check symgraph.json syntax and field types".to_string(),
            }
            .into()
        })
    }

    /// `SYMGRAPH_MAX_HOPS`, `SYMGRAPH_DIRECTION` and friends, mapped onto the
    /// camelCase field names. Unrelated `SYMGRAPH_*` variables are ignored.
    ///
    /// `filter_map` resets the lowercase flag, so `lowercase(false)` follows it.
    fn env() -> Env {
        Env::prefixed(Self::ENV_PREFIX)
            .filter_map(|key| {
                let field = match key.as_str().to_ascii_lowercase().as_str() {
                    "aliases" => "aliases",
                    "exclude" => "exclude",
                    "tsconfig" => "tsconfig",
                    "direction" => "direction",
                    "max_hops" | "maxhops" => "maxHops",
                    _ => return None,
                };
                Some(Uncased::from(field))
            })
            .lowercase(false)
    }

    fn config_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            return if path.is_file() {
                Ok(Some(path))
            } else {
                Err(ConfigError::NotFound(path).into())
            };
        }
        let default_path = root.join(Self::FILE_NAME);
        Ok(default_path.is_file().then_some(default_path))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;
    use crate::config::DEFAULT_MAX_HOPS;
    use crate::error::CliError;

    fn clear_env() {
        unsafe {
            std::env::remove_var("SYMGRAPH_MAX_HOPS");
            std::env::remove_var("SYMGRAPH_DIRECTION");
            std::env::remove_var("SYMGRAPH_LOG_STYLE");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        clear_env();
        let temp = TempDir::new().unwrap();

        let config = SymgraphConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();

        assert_eq!(config, SymgraphConfig::default());
        assert_eq!(config.max_hops, DEFAULT_MAX_HOPS);
        assert_eq!(config.direction, Direction::Dependencies);
    }

    #[test]
    #[serial]
    fn test_file_then_env_then_flags() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("symgraph.json"),
            r#"{
                "aliases": { "@core": "packages/core/src" },
                "exclude": ["dist/**"],
                "direction": "dependents",
                "maxHops": 4
            }"#,
        )
        .unwrap();

        let config = SymgraphConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.aliases.get("@core"), Some("packages/core/src"));
        assert_eq!(config.exclude, vec!["dist/**"]);
        assert_eq!(config.direction, Direction::Dependents);
        assert_eq!(config.max_hops, 4);

        unsafe {
            std::env::set_var("SYMGRAPH_MAX_HOPS", "6");
            std::env::set_var("SYMGRAPH_LOG_STYLE", "unrelated");
        }
        let config = SymgraphConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.max_hops, 6);

        let overrides = ConfigOverrides {
            direction: Some(Direction::Both),
            max_hops: Some(1),
        };
        let config = SymgraphConfig::load(temp.path(), None, &overrides).unwrap();
        assert_eq!(config.max_hops, 1);
        assert_eq!(config.direction, Direction::Both);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_keys_map_to_camel_case_fields() {
        clear_env();
        let temp = TempDir::new().unwrap();
        unsafe {
            std::env::set_var("SYMGRAPH_MAX_HOPS", "5");
            std::env::set_var("SYMGRAPH_DIRECTION", "both");
        }

        let result = SymgraphConfig::load(temp.path(), None, &ConfigOverrides::default());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.max_hops, 5);
        assert_eq!(config.direction, Direction::Both);
    }

    #[test]
    #[serial]
    fn test_explicit_missing_config_is_error() {
        clear_env();
        let temp = TempDir::new().unwrap();

        let err = SymgraphConfig::load(
            temp.path(),
            Some(Path::new("nope.json")),
            &ConfigOverrides::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_unknown_field_is_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("symgraph.json"), r#"{ "entry": ["a.ts"] }"#).unwrap();

        let err = SymgraphConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap_err();

        assert!(err.to_string().contains("Hint:"));
    }
}
