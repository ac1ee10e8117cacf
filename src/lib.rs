//! mtree - binary Merkle trees with inclusion proofs
//!
//! mtree stores an ordered, append-only list of byte-string leaves, builds a
//! binary Merkle tree over them on demand, and produces inclusion proofs that
//! can be checked without the tree.
//!
//! # Core Features
//!
//! - **Selectable digests**: SHA-2, SHA-3, Keccak-256, BLAKE3 and legacy MD5
//! - **Secure mode**: leaves are hashed before they are stored
//! - **Lazy building**: the tree is rebuilt only after the leaves change
//! - **Portable proofs**: JSON, binary and text encodings
//!
//! # Example Usage
//!
//! ```rust
//! use mtree::MerkleTree;
//!
//! let mut tree = MerkleTree::new(true, "sha256")?;
//! tree.add_leaves(["tierion", "bitcoin", "blockchain"]);
//!
//! let root = tree.root()?;
//! let proof = tree.inclusion_proof(1)?;
//! assert_eq!(proof.claimed_root, root);
//! assert!(tree.verify_inclusion_proof(&proof)?);
//! # Ok::<(), mtree::MerkleError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;
pub mod tree;

// Re-export commonly used types
pub use crate::core::{
    error::{MerkleError, Result},
    hash::{HashAlgorithm, HashEngine},
    types::ByteString,
};

pub use config::{MtreeConfig, TreeConfig};

pub use proofs::{Proof, ProofElement, ProofVerifier, Side};

pub use tree::{MerkleTree, SharedMerkleTree, Tree};

/// Current version of mtree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
