//! CLI context for storing global options during command execution

use crate::cli::{Cli, ColorChoice};
use crate::config::{MtreeConfig, TreeConfig};
use crate::core::error::MerkleError;
use crate::core::hash::HashAlgorithm;
use crate::tree::MerkleTree;
use anyhow::Result;
use std::path::PathBuf;
use tracing::warn;

/// Global options and the configuration they resolve to
#[derive(Debug, Clone)]
pub struct CliContext {
    pub quiet: bool,
    /// File the configuration was read from, when one could be located
    pub config_path: Option<PathBuf>,
    pub config: MtreeConfig,
    /// Algorithm given on the command line or through the environment
    pub algorithm_override: Option<HashAlgorithm>,
}

impl CliContext {
    /// Load the configuration and apply flag and environment overrides
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        match cli.color {
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
            ColorChoice::Auto => {}
        }

        let config_path = match &cli.config {
            Some(path) => Some(path.clone()),
            None => match MtreeConfig::get_config_path() {
                Ok(path) => Some(path),
                Err(MerkleError::HomeDirectoryNotFound) => {
                    warn!("home directory not found, using default configuration");
                    None
                }
                Err(e) => return Err(e.into()),
            },
        };

        let mut config = match &config_path {
            Some(path) => MtreeConfig::load_from(path)?,
            None => MtreeConfig::default(),
        };

        let algorithm_override = cli
            .algorithm
            .as_deref()
            .map(str::parse::<HashAlgorithm>)
            .transpose()?;
        if let Some(algorithm) = algorithm_override {
            config.tree.algorithm = algorithm;
        }
        if let Some(secure) = cli.secure {
            config.tree.secure = secure;
        }

        Ok(Self {
            quiet: cli.quiet,
            config_path,
            config,
            algorithm_override,
        })
    }

    pub fn tree_config(&self) -> &TreeConfig {
        &self.config.tree
    }

    /// Empty tree with the effective settings
    pub fn new_tree(&self) -> MerkleTree {
        MerkleTree::from_config(&self.config.tree)
    }

    /// Path of the configuration file, failing when none can be located
    pub fn require_config_path(&self) -> Result<&PathBuf> {
        self.config_path
            .as_ref()
            .ok_or_else(|| MerkleError::HomeDirectoryNotFound.into())
    }
}
