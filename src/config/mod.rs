//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/pseudo-points/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::sampling::SamplingConfig;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Sampling parameters
    #[serde(default)]
    pub sampling: SamplingSettings,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Raw sampling settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingSettings {
    /// Sampling mode: polygon or circle
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Extra samples given to the coarsest resolution
    #[serde(default = "default_max_amount")]
    pub max_amount: i64,

    /// Fixed seed for reproducible runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Exported annotation rows (CSV or JSON)
    #[serde(default = "default_annotations")]
    pub annotations: String,

    /// Directory receiving timestamped output files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: csv or json
    #[serde(default = "default_format")]
    pub format: String,
}

/// Paths file shared with other tooling: `{"annotation": "<dir>"}`
#[derive(Debug, Clone, Deserialize)]
pub struct PathsFile {
    pub annotation: String,
}

impl PathsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read paths file {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse paths file {}: {}", path.display(), e))
        })
    }
}

// Default value functions for serde
fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}
fn default_max_amount() -> i64 {
    DEFAULT_MAX_AMOUNT
}
fn default_annotations() -> String {
    DEFAULT_ANNOTATIONS.to_string()
}
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            max_amount: default_max_amount(),
            seed: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            annotations: default_annotations(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it with defaults
    /// when missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validated sampling parameters
    pub fn sampling_config(&self) -> Result<SamplingConfig> {
        SamplingConfig::parse(&self.sampling.mode, self.sampling.max_amount)
    }

    /// Check every value an extraction run depends on
    pub fn validate(&self) -> Result<()> {
        self.sampling_config()?;
        if get_formatter(&self.output.format).is_none() {
            return Err(Error::Config(format!(
                "Unknown output format: {}",
                self.output.format
            )));
        }
        if self.paths.annotations.trim().is_empty() {
            return Err(Error::Config("paths.annotations is empty".to_string()));
        }
        if self.paths.output_dir.trim().is_empty() {
            return Err(Error::Config("paths.output_dir is empty".to_string()));
        }
        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["sampling", "mode"] => Some(self.sampling.mode.clone()),
            ["sampling", "max_amount"] => Some(self.sampling.max_amount.to_string()),
            ["sampling", "seed"] => Some(
                self.sampling
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            ),

            ["paths", "annotations"] => Some(self.paths.annotations.clone()),
            ["paths", "output_dir"] => Some(self.paths.output_dir.clone()),

            ["output", "format"] => Some(self.output.format.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["sampling", "mode"] => {
                SamplingConfig::parse(value, self.sampling.max_amount)?;
                self.sampling.mode = value.to_string();
            }
            ["sampling", "max_amount"] => {
                let amount = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max_amount value: {}", value))
                })?;
                SamplingConfig::parse(&self.sampling.mode, amount)?;
                self.sampling.max_amount = amount;
            }
            ["sampling", "seed"] => {
                self.sampling.seed = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        Error::Config(format!("Invalid seed value: {}", value))
                    })?)
                };
            }

            ["paths", "annotations"] => {
                self.paths.annotations = value.to_string();
            }
            ["paths", "output_dir"] => {
                self.paths.output_dir = value.to_string();
            }

            ["output", "format"] => {
                if get_formatter(value).is_none() {
                    return Err(Error::Config(format!("Unknown output format: {}", value)));
                }
                self.output.format = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "sampling.mode",
            "sampling.max_amount",
            "sampling.seed",
            "paths.annotations",
            "paths.output_dir",
            "output.format",
        ]
    }
}
