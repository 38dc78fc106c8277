// src/config.rs

//! Manages engine configuration: loading from TOML and validation.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;

/// Resource limits applied to every function call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Maximum nesting of arrays and objects accepted by the parser.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum number of steps after `$` in a JSONPath.
    #[serde(default = "default_max_path_steps")]
    pub max_path_steps: usize,
    /// Longest text `PARSE_JSON` accepts, in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Most `null`s an edit may add to reach an index past the end of an array.
    #[serde(default = "default_max_array_pad")]
    pub max_array_pad: usize,
    /// Number of compiled paths kept per engine. `0` disables the cache.
    #[serde(default = "default_path_cache_capacity")]
    pub path_cache_capacity: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_path_steps: default_max_path_steps(),
            max_input_bytes: default_max_input_bytes(),
            max_array_pad: default_max_array_pad(),
            path_cache_capacity: default_path_cache_capacity(),
        }
    }
}

/// Text output settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Spaces per nesting level in pretty-printed JSON.
    #[serde(default = "default_pretty_indent")]
    pub pretty_indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_indent: default_pretty_indent(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_depth() -> usize {
    512
}
fn default_max_path_steps() -> usize {
    256
}
fn default_max_input_bytes() -> usize {
    64 * 1024 * 1024 // 64 MB
}
fn default_max_array_pad() -> usize {
    1 << 20
}
fn default_path_cache_capacity() -> usize {
    1024
}
fn default_pretty_indent() -> usize {
    2
}

/// The complete engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            limits: LimitsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid configuration in '{path}'"))?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_depth == 0 {
            return Err(anyhow!("limits.max_depth cannot be 0"));
        }
        if self.limits.max_path_steps == 0 {
            return Err(anyhow!("limits.max_path_steps cannot be 0"));
        }
        if self.limits.max_input_bytes == 0 {
            return Err(anyhow!("limits.max_input_bytes cannot be 0"));
        }
        if !(1..=16).contains(&self.output.pretty_indent) {
            return Err(anyhow!(
                "output.pretty_indent must be between 1 and 16, got {}",
                self.output.pretty_indent
            ));
        }
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("unknown log_level '{}'", self.log_level))?;

        if self.limits.max_depth < 8 {
            warn!(
                "low max_depth setting: {}. Most real-world documents nest deeper than this.",
                self.limits.max_depth
            );
        }
        if self.limits.path_cache_capacity == 0 {
            warn!("path cache is disabled; every call will recompile its JSONPath arguments.");
        }
        Ok(())
    }
}
