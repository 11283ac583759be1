//! Configuration loading, validation, and management for Eratos.
//!
//! Loads configuration from `~/.eratos/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use eratos_core::{MAX_RANGE, MIN_RANGE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`AppConfig::bits`].
pub const ENV_BITS: &str = "ERATOS_BITS";

/// Environment variable overriding [`AppConfig::max_range`].
pub const ENV_MAX_RANGE: &str = "ERATOS_MAX_RANGE";

/// The root configuration structure.
///
/// Maps directly to `~/.eratos/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sieve bound as a power of two: numbers below `2^bits` are covered
    #[serde(default = "default_bits")]
    pub bits: u32,

    /// Explicit sieve bound; takes precedence over `bits`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_range: Option<u64>,

    /// Primes found between progress log lines
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,

    /// Randomized factorization self-test
    #[serde(default)]
    pub self_test: SelfTestConfig,

    /// Run time extrapolation to larger bounds
    #[serde(default)]
    pub timeline: TimelineConfig,
}

fn default_bits() -> u32 {
    24
}
fn default_progress_interval() -> u64 {
    eratos_core::DEFAULT_PROGRESS_INTERVAL
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfTestConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Numbers sampled per run
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Fixed RNG seed for reproducible sampling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_samples() -> usize {
    30
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            samples: default_samples(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Largest bit width to extrapolate to
    #[serde(default = "default_max_bits")]
    pub max_bits: u32,

    /// Every bit width up to here gets a line; beyond it only every `sparse_step`
    #[serde(default = "default_dense_until_bits")]
    pub dense_until_bits: u32,

    #[serde(default = "default_sparse_step")]
    pub sparse_step: u32,
}

fn default_max_bits() -> u32 {
    256
}
fn default_dense_until_bits() -> u32 {
    80
}
fn default_sparse_step() -> u32 {
    8
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bits: default_max_bits(),
            dense_until_bits: default_dense_until_bits(),
            sparse_step: default_sparse_step(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.eratos/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `ERATOS_BITS`
    /// - `ERATOS_MAX_RANGE`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::default_path())
    }

    /// Load from `path`, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_BITS) {
            self.bits = parse_override(ENV_BITS, &raw)?;
            tracing::debug!(bits = self.bits, "Sieve bits overridden from environment");
        }

        if let Some(raw) = lookup(ENV_MAX_RANGE) {
            self.max_range = Some(parse_override(ENV_MAX_RANGE, &raw)?);
            tracing::debug!(max_range = ?self.max_range, "Sieve range overridden from environment");
        }

        self.validate()
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |reason: String| ConfigError::WriteError {
            path: path.to_path_buf(),
            reason,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| write_error(e.to_string()))
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".eratos")
    }

    /// Get the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// The exclusive sieve bound these settings ask for.
    pub fn effective_max_range(&self) -> u64 {
        self.max_range
            .unwrap_or_else(|| 1u64.checked_shl(self.bits).unwrap_or(u64::MAX))
    }

    /// Bit width of the sieve bound, rounded up for non-power-of-two ranges.
    pub fn effective_bits(&self) -> u32 {
        match self.max_range {
            Some(range) => u64::BITS - range.saturating_sub(1).leading_zeros(),
            None => self.bits,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=32).contains(&self.bits) {
            return Err(ConfigError::ValidationError(format!(
                "bits must be between 2 and 32, got {}",
                self.bits
            )));
        }

        if let Some(range) = self.max_range {
            if !(MIN_RANGE..=MAX_RANGE).contains(&range) {
                return Err(ConfigError::ValidationError(format!(
                    "max_range must be between {MIN_RANGE} and {MAX_RANGE}, got {range}"
                )));
            }
        }

        if self.progress_interval == 0 {
            return Err(ConfigError::ValidationError(
                "progress_interval must be > 0".into(),
            ));
        }

        if self.self_test.enabled && self.self_test.samples == 0 {
            return Err(ConfigError::ValidationError(
                "self_test.samples must be > 0".into(),
            ));
        }

        let timeline = &self.timeline;
        if timeline.sparse_step == 0 {
            return Err(ConfigError::ValidationError(
                "timeline.sparse_step must be > 0".into(),
            ));
        }
        if timeline.max_bits > 512 {
            return Err(ConfigError::ValidationError(
                "timeline.max_bits must be at most 512".into(),
            ));
        }
        if timeline.dense_until_bits > timeline.max_bits {
            return Err(ConfigError::ValidationError(
                "timeline.dense_until_bits must not exceed timeline.max_bits".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bits: default_bits(),
            max_range: None,
            progress_interval: default_progress_interval(),
            self_test: SelfTestConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .replace('_', "")
        .parse()
        .map_err(|e| ConfigError::ValidationError(format!("{key}={raw:?} is not valid: {e}")))
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to write config file at {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.bits, 24);
        assert_eq!(config.effective_max_range(), 1 << 24);
        assert_eq!(config.progress_interval, 1_000);
        assert_eq!(config.self_test.samples, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig {
            max_range: Some(1_000_000),
            ..AppConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.max_range, Some(1_000_000));
        assert_eq!(parsed.timeline.max_bits, config.timeline.max_bits);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let toml_str = r#"
bits = 20

[self_test]
samples = 5
seed = 99
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bits, 20);
        assert_eq!(config.self_test.samples, 5);
        assert_eq!(config.self_test.seed, Some(99));
        assert!(config.self_test.enabled);
        assert_eq!(config.timeline.dense_until_bits, 80);
    }

    #[test]
    fn invalid_bits_rejected() {
        for bits in [0, 1, 33] {
            let config = AppConfig {
                bits,
                ..AppConfig::default()
            };
            assert!(config.validate().is_err(), "bits = {bits}");
        }
    }

    #[test]
    fn invalid_max_range_rejected() {
        let config = AppConfig {
            max_range: Some(2),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_samples_only_matter_when_self_test_runs() {
        let mut config = AppConfig::default();
        config.self_test.samples = 0;
        assert!(config.validate().is_err());

        config.self_test.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_timeline_rejected() {
        let mut config = AppConfig::default();
        config.timeline.sparse_step = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.timeline.dense_until_bits = 300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_bits_rounds_up() {
        let mut config = AppConfig::default();
        assert_eq!(config.effective_bits(), 24);
        config.max_range = Some(1_000);
        assert_eq!(config.effective_bits(), 10);
        config.max_range = Some(1_024);
        assert_eq!(config.effective_bits(), 10);
        config.max_range = Some(1_025);
        assert_eq!(config.effective_bits(), 11);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().bits, 24);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bits = \"many\"").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            bits: 16,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.bits, 16);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[(ENV_BITS, "18"), (ENV_MAX_RANGE, "1_000_000")]))
            .unwrap();
        assert_eq!(config.bits, 18);
        assert_eq!(config.effective_max_range(), 1_000_000);
    }

    #[test]
    fn invalid_env_override_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(env(&[(ENV_BITS, "lots")])).is_err());

        let mut config = AppConfig::default();
        assert!(config.apply_overrides(env(&[(ENV_BITS, "40")])).is_err());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("bits = 24"));
        assert!(toml_str.contains("[timeline]"));
    }
}
