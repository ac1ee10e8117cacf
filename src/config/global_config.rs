//! Global configuration management
//!
//! Provides configuration stored in ~/.mtree/config.toml

use crate::core::error::{MerkleError, Result};
use crate::core::hash::HashAlgorithm;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Global configuration for mtree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtreeConfig {
    /// Tree construction settings
    pub tree: TreeConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Settings a tree is constructed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Hash leaves before storing them
    pub secure: bool,
    /// Digest algorithm
    pub algorithm: HashAlgorithm,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            secure: true,
            algorithm: HashAlgorithm::Sha256,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default proof encoding
    pub format: ProofFormat,
}

/// Proof encodings the CLI can read and write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProofFormat {
    #[default]
    Json,
    Binary,
    Text,
}

impl fmt::Display for ProofFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProofFormat::Json => "json",
            ProofFormat::Binary => "binary",
            ProofFormat::Text => "text",
        })
    }
}

impl FromStr for ProofFormat {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ProofFormat::Json),
            "binary" => Ok(ProofFormat::Binary),
            "text" => Ok(ProofFormat::Text),
            other => Err(MerkleError::configuration(format!(
                "output.format must be json, binary or text, got {:?}",
                other
            ))),
        }
    }
}

/// Configuration key for setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    TreeSecure,
    TreeAlgorithm,
    OutputFormat,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::TreeSecure,
        ConfigKey::TreeAlgorithm,
        ConfigKey::OutputFormat,
    ];

    pub fn parse(key: &str) -> Result<Self> {
        match key {
            "tree.secure" => Ok(ConfigKey::TreeSecure),
            "tree.algorithm" => Ok(ConfigKey::TreeAlgorithm),
            "output.format" => Ok(ConfigKey::OutputFormat),
            other => Err(MerkleError::configuration(format!(
                "unknown configuration key {:?}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::TreeSecure => "tree.secure",
            ConfigKey::TreeAlgorithm => "tree.algorithm",
            ConfigKey::OutputFormat => "output.format",
        }
    }
}

impl MtreeConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            MerkleError::configuration(format!("Failed to parse config: {}", e))
        })
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MerkleError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(MerkleError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".mtree").join("config.toml"))
    }

    /// Get a configuration value rendered as text
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::TreeSecure => self.tree.secure.to_string(),
            ConfigKey::TreeAlgorithm => self.tree.algorithm.to_string(),
            ConfigKey::OutputFormat => self.output.format.to_string(),
        }
    }

    /// Set a configuration value from text
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::TreeSecure => {
                self.tree.secure = value.trim().parse().map_err(|_| {
                    MerkleError::configuration(format!(
                        "tree.secure must be true or false, got {:?}",
                        value
                    ))
                })?;
            }
            ConfigKey::TreeAlgorithm => self.tree.algorithm = value.parse()?,
            ConfigKey::OutputFormat => self.output.format = value.parse()?,
        }
        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Vec<(&'static str, String)> {
        ConfigKey::ALL
            .iter()
            .map(|key| (key.as_str(), self.get(*key)))
            .collect()
    }
}
