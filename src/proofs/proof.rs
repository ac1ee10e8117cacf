//! Inclusion proof values and their encodings

use crate::core::{error::*, hash::HashAlgorithm, types::ByteString};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Version of the proof format
pub const PROOF_FORMAT_VERSION: &str = "1.0";

/// Type tag carried by inclusion proofs
pub const INCLUSION_PROOF_TYPE: &str = "MT-POI";

/// Position of a sibling relative to the path node at its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A single element in a merkle proof path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofElement {
    /// Whether the sibling is on the left or right
    pub side: Side,
    /// Bytes of the sibling node
    pub digest: ByteString,
}

impl ProofElement {
    pub fn new(side: Side, digest: ByteString) -> Self {
        Self { side, digest }
    }
}

/// Metadata included with proofs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofMetadata {
    /// Index of the proven leaf
    pub leaf_index: u64,
    /// Number of leaves in the tree the proof was taken from
    pub leaf_count: u64,
    /// Digest algorithm of that tree
    pub algorithm: HashAlgorithm,
    /// Timestamp when proof was generated
    pub generated_at: i64,
}

/// Self-contained inclusion proof.
///
/// Owns copies of every byte it references, so it stays valid after the
/// tree it came from is reset or dropped. Only `path`, `target_leaf` and
/// `claimed_root` are needed to verify; the remaining fields are filled in
/// on decode when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Version of the proof format
    #[serde(default = "default_version")]
    pub version: String,
    /// Type of proof
    #[serde(default = "default_proof_type")]
    pub proof_type: String,
    /// Stored bytes of the proven leaf
    pub target_leaf: ByteString,
    /// Root the path is expected to reach
    pub claimed_root: ByteString,
    /// Siblings in leaf-to-root order
    pub path: Vec<ProofElement>,
    /// Position and algorithm of the proven leaf, when known
    #[serde(default)]
    pub metadata: Option<ProofMetadata>,
}

fn default_version() -> String {
    PROOF_FORMAT_VERSION.to_string()
}

fn default_proof_type() -> String {
    INCLUSION_PROOF_TYPE.to_string()
}

impl Proof {
    /// Create a new inclusion proof stamped with the current time
    pub fn new_inclusion(
        target_leaf: ByteString,
        claimed_root: ByteString,
        path: Vec<ProofElement>,
        leaf_index: u64,
        leaf_count: u64,
        algorithm: HashAlgorithm,
    ) -> Self {
        Proof {
            version: default_version(),
            proof_type: default_proof_type(),
            target_leaf,
            claimed_root,
            path,
            metadata: Some(ProofMetadata {
                leaf_index,
                leaf_count,
                algorithm,
                generated_at: chrono::Utc::now().timestamp(),
            }),
        }
    }

    /// Bare proof carrying only the sibling path, leaf and root
    pub fn from_path(target_leaf: ByteString, claimed_root: ByteString, path: Vec<ProofElement>) -> Self {
        Proof {
            version: default_version(),
            proof_type: default_proof_type(),
            target_leaf,
            claimed_root,
            path,
            metadata: None,
        }
    }

    pub fn leaf_index(&self) -> Option<u64> {
        self.metadata.as_ref().map(|m| m.leaf_index)
    }

    pub fn leaf_count(&self) -> Option<u64> {
        self.metadata.as_ref().map(|m| m.leaf_count)
    }

    pub fn algorithm(&self) -> Option<HashAlgorithm> {
        self.metadata.as_ref().map(|m| m.algorithm)
    }

    /// Serialize proof to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(MerkleError::JsonSerialization)
    }

    /// Serialize proof to single-line JSON
    pub fn to_json_compact(&self) -> Result<String> {
        serde_json::to_string(self).map_err(MerkleError::JsonSerialization)
    }

    /// Deserialize proof from JSON; anything that does not parse is malformed
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MerkleError::malformed_proof(format!("invalid JSON proof: {}", e)))
    }

    /// Serialize proof to bincode
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize proof from bincode
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes)
            .map_err(|e| MerkleError::malformed_proof(format!("invalid binary proof: {}", e)))
    }

    /// Human-readable rendering
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "Proof Type: {}", self.proof_type);
        let _ = writeln!(output, "Version: {}", self.version);
        if let Some(metadata) = &self.metadata {
            let _ = writeln!(output, "Algorithm: {}", metadata.algorithm);
            let _ = writeln!(output, "Leaf: {} of {}", metadata.leaf_index, metadata.leaf_count);
        }
        let _ = writeln!(output, "Target Leaf: {}", self.target_leaf.to_hex());
        let _ = writeln!(output, "Root Hash: {}", self.claimed_root.to_hex());
        if let Some(metadata) = &self.metadata {
            let _ = writeln!(output, "Generated: {}", metadata.generated_at);
        }
        let _ = writeln!(output, "Proof Elements: {} elements", self.path.len());

        for (i, element) in self.path.iter().enumerate() {
            let side = match element.side {
                Side::Left => "Left",
                Side::Right => "Right",
            };
            let _ = writeln!(output, "  {}: {} - {}", i + 1, side, element.digest.to_hex());
        }

        output
    }
}
