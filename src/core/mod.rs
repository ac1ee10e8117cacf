//! Core types and utilities for mtree
//!
//! This module contains the byte-string type, error handling,
//! and the hash engine used throughout the system.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{MerkleError, Result};
pub use hash::{sha256, HashAlgorithm, HashEngine};
pub use types::ByteString;
