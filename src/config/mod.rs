//! Global configuration management for mtree
//!
//! Settings are stored in ~/.mtree/config.toml unless another file is given.

pub mod global_config;

// Re-export commonly used items
pub use global_config::{ConfigKey, MtreeConfig, OutputConfig, ProofFormat, TreeConfig};
