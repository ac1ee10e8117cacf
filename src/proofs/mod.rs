//! Merkle proof system for mtree
//!
//! This module provides generation and verification of inclusion proofs,
//! plus their JSON, binary and text encodings. Exclusion proofs are not
//! supported.

pub mod generator;
pub mod proof;
pub mod verifier;

// Re-export commonly used items
pub use generator::ProofGenerator;
pub use proof::{
    Proof, ProofElement, ProofMetadata, Side, INCLUSION_PROOF_TYPE, PROOF_FORMAT_VERSION,
};
pub use verifier::{expected_path_len, ProofVerifier};
