//! Error types for mtree

use thiserror::Error;

/// Main error type for Merkle tree operations
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Input of the wrong shape was offered at a boundary operation
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Leaf or proof index beyond the number of leaves
    #[error("Index {index} out of range for {count} leaves")]
    IndexOutOfRange { index: usize, count: usize },

    /// Root or proof requested on a tree without leaves
    #[error("Tree has no leaves")]
    EmptyTree,

    #[error("Unsupported hash algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    /// Proof is structurally invalid (as opposed to not matching its root)
    #[error("Malformed proof: {reason}")]
    MalformedProof { reason: String },

    #[error("Not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary encoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(serde_json::Error),
}

impl MerkleError {
    /// Create a new type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a new index out of range error
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create a new unsupported algorithm error
    pub fn unsupported_algorithm(algorithm: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm {
            algorithm: algorithm.into(),
        }
    }

    /// Create a new malformed proof error
    pub fn malformed_proof(reason: impl Into<String>) -> Self {
        Self::MalformedProof {
            reason: reason.into(),
        }
    }

    /// Create a new not implemented error
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for mtree operations
pub type Result<T> = std::result::Result<T, MerkleError>;
