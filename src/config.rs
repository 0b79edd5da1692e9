//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/forkjoin/forkjoin.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `FORKJOIN_*` prefix
//!
//! Command line flags (e.g. `--workers`) are applied by the CLI on top.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::sort::FORK_DEPTH;

/// Default number of worker threads in the pool.
pub const DEFAULT_WORKERS: usize = 4;

/// Settings for the `bench` comparison harness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchConfig {
    /// Array sizes to compare
    pub sizes: Vec<usize>,
    /// Generated values lie in `0..max_value`
    pub max_value: i32,
    /// Number of leading elements printed per array
    pub preview: usize,
    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10_000, 20_000],
            max_value: 10_000,
            preview: 10,
            seed: None,
        }
    }
}

/// Raw bench config for intermediate parsing (Option detects "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBenchConfig {
    pub sizes: Option<Vec<usize>>,
    pub max_value: Option<i32>,
    pub preview: Option<usize>,
    pub seed: Option<u64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub workers: Option<usize>,
    pub fork_depth: Option<usize>,
    #[serde(default)]
    pub bench: RawBenchConfig,
}

impl BenchConfig {
    /// Overlay wins field by field; arrays are replaced, not merged.
    pub fn merge(&self, overlay: &RawBenchConfig) -> Self {
        Self {
            sizes: overlay.sizes.clone().unwrap_or_else(|| self.sizes.clone()),
            max_value: overlay.max_value.unwrap_or(self.max_value),
            preview: overlay.preview.unwrap_or(self.preview),
            seed: overlay.seed.or(self.seed),
        }
    }
}

/// Unified configuration for forkjoin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Worker threads in the pool (default: 4)
    pub workers: usize,
    /// Recursion depth up to which parallel merge sort forks (default: 3)
    pub fork_depth: usize,
    /// Comparison harness settings
    pub bench: BenchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            fork_depth: FORK_DEPTH,
            bench: BenchConfig::default(),
        }
    }
}

/// Get the XDG config directory for forkjoin.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forkjoin").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("forkjoin.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            workers: overlay.workers.unwrap_or(self.workers),
            fork_depth: overlay.fork_depth.unwrap_or(self.fork_depth),
            bench: self.bench.merge(&overlay.bench),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/forkjoin/forkjoin.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `FORKJOIN_*` prefix
    ///
    /// The result is not validated; CLI flags may still override it, so
    /// callers run [`Settings::validate`] once all layers are applied.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply FORKJOIN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FORKJOIN")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bench.sizes")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<usize>(&config, "workers")? {
            settings.workers = val;
        }
        if let Some(val) = env_value::<usize>(&config, "fork_depth")? {
            settings.fork_depth = val;
        }
        if let Some(val) = env_value::<Vec<usize>>(&config, "bench.sizes")? {
            settings.bench.sizes = val;
        }
        if let Some(val) = env_value::<i32>(&config, "bench.max_value")? {
            settings.bench.max_value = val;
        }
        if let Some(val) = env_value::<usize>(&config, "bench.preview")? {
            settings.bench.preview = val;
        }
        if let Some(val) = env_value::<u64>(&config, "bench.seed")? {
            settings.bench.seed = Some(val);
        }

        Ok(settings)
    }

    /// Reject settings no pool or generator can honor.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.workers == 0 {
            return Err(ApplicationError::Config {
                message: "workers must be at least 1".into(),
            });
        }
        if self.bench.max_value <= 0 {
            return Err(ApplicationError::Config {
                message: format!("bench.max_value must be positive, got {}", self.bench.max_value),
            });
        }
        // TOML integers are signed 64-bit
        if let Some(seed) = self.bench.seed.filter(|&s| i64::try_from(s).is_err()) {
            return Err(ApplicationError::Config {
                message: format!("bench.seed must be at most {}, got {}", i64::MAX, seed),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# forkjoin configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/forkjoin/forkjoin.toml
#   File:   forkjoin --config <FILE>
#   Env:    FORKJOIN_* environment variables (e.g. FORKJOIN_WORKERS=8,
#           FORKJOIN_BENCH__SIZES=1000,5000)
#   Flags:  --workers

# Worker threads used by every parallel region
# workers = 4

# Parallel merge sort forks while recursion depth < fork_depth
# fork_depth = 3

[bench]
# Array sizes compared by `forkjoin bench`
# sizes = [10000, 20000]

# Random values are drawn from 0..max_value
# max_value = 10000

# Leading elements printed per array
# preview = 10

# Fixed seed for reproducible arrays
# seed = 42
"#
        .to_string()
    }
}

/// Typed env lookup: absent keys are `None`, malformed values are errors.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("FORKJOIN_{}: {}", key.to_uppercase().replace('.', "__"), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_uses_four_workers_and_depth_three() {
        let settings = Settings::default();
        assert_eq!(settings.workers, 4);
        assert_eq!(settings.fork_depth, 3);
        assert_eq!(settings.bench.sizes, vec![10_000, 20_000]);
        assert_eq!(settings.bench.preview, 10);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            workers: Some(8),
            fork_depth: None,
            bench: RawBenchConfig {
                sizes: Some(vec![100]),
                max_value: None,
                preview: None,
                seed: Some(7),
            },
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.workers, 8);
        assert_eq!(merged.fork_depth, 3);
        assert_eq!(merged.bench.sizes, vec![100]);
        assert_eq!(merged.bench.max_value, 10_000);
        assert_eq!(merged.bench.seed, Some(7));
    }

    #[test]
    fn given_zero_workers_when_validating_then_fails() {
        let settings = Settings {
            workers: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_seed_beyond_toml_range_when_validating_then_fails() {
        let mut settings = Settings::default();
        settings.bench.seed = Some(u64::MAX);
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));

        settings.bench.seed = Some(i64::MAX as u64);
        settings.validate().unwrap();
        let raw: RawSettings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(raw.bench.seed, Some(i64::MAX as u64));
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
