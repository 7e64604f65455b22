//! Configuration loading
//!
//! Settings come from a TOML file and are then overridden by `RADCALC_*`
//! environment variables. Command-line flags are applied last by the caller.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "radcalc.toml";
pub const CONFIG_PATH_VAR: &str = "RADCALC_CONFIG_PATH";

const LOG_LEVEL_VAR: &str = "RADCALC_LOG_LEVEL";
const LOG_FORMAT_VAR: &str = "RADCALC_LOG_FORMAT";
const OUTPUT_PRETTY_VAR: &str = "RADCALC_OUTPUT_PRETTY";
const STRICT_CATEGORIES_VAR: &str = "RADCALC_STRICT_CATEGORIES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse configuration file '{}': {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("invalid value '{value}' for {variable}: expected {expected}")]
    InvalidOverride { variable: &'static str, value: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `radcalc_calculator=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Reject unrecognized category tokens instead of using the table fallback.
    pub strict_categories: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RadcalcConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub normalizer: NormalizerConfig,
}

impl RadcalcConfig {
    /// Loads configuration using the process environment.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit_path, |key| std::env::var(key).ok())
    }

    /// Loads configuration with `env` standing in for the process environment.
    ///
    /// The file is `explicit_path`, else `$RADCALC_CONFIG_PATH`, else
    /// `radcalc.toml`. Only the last may be missing.
    pub fn load_with(
        explicit_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let (path, required) = match explicit_path {
            Some(path) => (path.to_path_buf(), true),
            None => match env(CONFIG_PATH_VAR) {
                Some(path) => (PathBuf::from(path), true),
                None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
            },
        };

        let config = match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Self::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        config.apply_env_overrides(env)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn apply_env_overrides(
        mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = env(LOG_LEVEL_VAR) {
            self.logging.level = level;
        }
        if let Some(format) = env(LOG_FORMAT_VAR) {
            self.logging.format = format.parse().map_err(|_| ConfigError::InvalidOverride {
                variable: LOG_FORMAT_VAR,
                value: format.clone(),
                expected: "compact or json",
            })?;
        }
        if let Some(pretty) = env(OUTPUT_PRETTY_VAR) {
            self.output.pretty = parse_bool(OUTPUT_PRETTY_VAR, &pretty)?;
        }
        if let Some(strict) = env(STRICT_CATEGORIES_VAR) {
            self.normalizer.strict_categories = parse_bool(STRICT_CATEGORIES_VAR, &strict)?;
        }
        Ok(self)
    }
}

fn parse_bool(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            variable,
            value: value.to_string(),
            expected: "a boolean",
        }),
    }
}
