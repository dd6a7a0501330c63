//! `DictCol` Configuration Module
//!
//! Replaces process-wide settings with an explicit [`EngineConfig`] value that
//! is handed to the encode and query entry points.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`DICTCOL_<SECTION>__<KEY>`)
//! 3. Configuration file (`dictcol.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable prefix.
const ENV_PREFIX: &str = "DICTCOL_";

/// String keys taken verbatim from the environment, so `123` or `007` stay text.
const VERBATIM_ENV_KEYS: [(&str, &str); 2] = [
    ("QUERY__ITEM", "query.item"),
    ("QUERY__PREFIX", "query.prefix"),
];

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Which query to run and against which representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Exact match against the dictionary-encoded column.
    EncodedItem,
    /// Prefix match against the dictionary-encoded column (default).
    #[default]
    EncodedPrefix,
    /// Exact match against the raw column.
    VanillaItem,
    /// Prefix match against the raw column.
    VanillaPrefix,
}

impl QueryMode {
    /// Returns true if this mode reads the persisted artifact.
    #[must_use]
    pub fn uses_artifact(&self) -> bool {
        matches!(self, Self::EncodedItem | Self::EncodedPrefix)
    }

    /// Returns true if this mode searches by prefix.
    #[must_use]
    pub fn is_prefix(&self) -> bool {
        matches!(self, Self::EncodedPrefix | Self::VanillaPrefix)
    }
}

/// Encoder configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Number of parallel workers.
    pub workers: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { workers: 2 }
    }
}

/// Query configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Use the SIMD scan over encoded data instead of the scalar loop.
    pub vectorized: bool,
    /// Selected query mode.
    pub mode: QueryMode,
    /// Item looked up by the exact-match modes.
    pub item: String,
    /// Prefix looked up by the prefix modes.
    pub prefix: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            vectorized: true,
            mode: QueryMode::EncodedPrefix,
            item: "knvr".to_string(),
            prefix: "knv".to_string(),
        }
    }
}

/// Storage configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Line-oriented raw column source.
    pub column_path: PathBuf,
    /// Persisted dictionary + encoded column.
    pub artifact_path: PathBuf,
    /// Output of prefix queries.
    pub results_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            column_path: PathBuf::from("column.txt"),
            artifact_path: PathBuf::from("encoded_column.bin"),
            results_path: PathBuf::from("result.txt"),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main `DictCol` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Encoder configuration.
    pub encoder: EncoderConfig,
    /// Query configuration.
    pub query: QueryConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("dictcol.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .ignore(&VERBATIM_ENV_KEYS.map(|(var, _)| var))
                    .split("__"),
            );

        for (var, key) in VERBATIM_ENV_KEYS {
            if let Ok(value) = std::env::var(format!("{ENV_PREFIX}{var}")) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encoder.workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "encoder.workers".to_string(),
                message: "value must be >= 1".to_string(),
            });
        }

        let paths = [
            ("storage.column_path", &self.storage.column_path),
            ("storage.artifact_path", &self.storage.artifact_path),
            ("storage.results_path", &self.storage.results_path),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }
}
