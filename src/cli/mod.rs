//! Command-line interface for mtree

use crate::config::ProofFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod context;
pub mod input;

pub use context::CliContext;
pub use input::InputFormat;

/// mtree - build Merkle trees over files of leaves and prove membership
#[derive(Parser)]
#[command(
    name = "mtree",
    version,
    about = "Build Merkle trees over files of leaves and prove membership",
    long_about = "mtree reads leaves from a file, builds a binary Merkle tree over them, and generates or verifies inclusion proofs."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Configuration file (default: ~/.mtree/config.toml)
    #[arg(long, global = true, env = "MTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hash algorithm, overriding the configuration file
    #[arg(long, global = true, env = "MTREE_ALGORITHM")]
    pub algorithm: Option<String>,

    /// Hash leaves before storing them, overriding the configuration file
    #[arg(long, global = true, env = "MTREE_SECURE")]
    pub secure: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the root of the tree over a file of leaves
    Root {
        /// File of leaves, or - for stdin
        input: PathBuf,

        /// How leaves are laid out in the input
        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        input_format: InputFormat,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an inclusion proof for one leaf
    Prove {
        /// File of leaves, or - for stdin
        input: PathBuf,

        /// Index of the leaf to prove
        #[arg(short, long)]
        index: usize,

        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        input_format: InputFormat,

        /// Output file for proof (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Proof encoding (default: output.format from the configuration)
        #[arg(long, value_enum)]
        format: Option<ProofFormat>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Verify an inclusion proof
    Verify {
        /// Proof file, or - for stdin
        proof: PathBuf,

        /// Require the proof to commit to this root (hex)
        #[arg(long)]
        root: Option<String>,

        /// Proof encoding (default: detected)
        #[arg(long, value_enum)]
        format: Option<ProofFormat>,
    },

    /// Show every level of the tree
    Inspect {
        /// File of leaves, or - for stdin
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        input_format: InputFormat,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a stored leaf
    Leaf {
        /// File of leaves, or - for stdin
        input: PathBuf,

        /// Index of the leaf
        #[arg(short, long)]
        index: usize,

        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        input_format: InputFormat,
    },

    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one configuration value
    Get {
        /// Key such as tree.algorithm
        key: String,
    },

    /// Set one configuration value
    Set {
        key: String,
        value: String,
    },
}
