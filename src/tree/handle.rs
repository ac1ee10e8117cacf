//! The public Merkle tree handle
//!
//! A [`MerkleTree`] owns its leaves and a memoizing builder. Any mutation
//! of the leaves drops the cached tree; reading the root or asking for a
//! proof rebuilds it on demand.

use crate::config::TreeConfig;
use crate::core::{
    error::*,
    hash::{HashAlgorithm, HashEngine},
    types::ByteString,
};
use crate::proofs::{Proof, ProofGenerator, ProofVerifier};
use crate::tree::builder::{Tree, TreeBuilder};
use crate::tree::leaf_store::LeafStore;
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// An append-only Merkle tree over byte-string leaves
#[derive(Debug, Clone)]
pub struct MerkleTree {
    store: LeafStore,
    builder: TreeBuilder,
    engine: HashEngine,
    secure: bool,
}

impl MerkleTree {
    /// Create a tree for an algorithm identifier such as `"sha256"`
    pub fn new(secure: bool, algorithm: &str) -> Result<Self> {
        Ok(Self::with_algorithm(secure, algorithm.parse()?))
    }

    pub fn with_algorithm(secure: bool, algorithm: HashAlgorithm) -> Self {
        let engine = HashEngine::new(algorithm);
        Self {
            store: LeafStore::new(),
            builder: TreeBuilder::new(engine),
            engine,
            secure,
        }
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        Self::with_algorithm(config.secure, config.algorithm)
    }

    /// Append a leaf and return its index.
    ///
    /// In secure mode the digest of `value` is stored, otherwise `value` itself.
    pub fn add_leaf(&mut self, value: impl AsRef<[u8]>) -> usize {
        self.builder.invalidate();
        self.store.append(value.as_ref(), self.secure, &self.engine)
    }

    /// Append leaves in iteration order, returning the range of new indices
    pub fn add_leaves<I>(&mut self, values: I) -> Range<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.builder.invalidate();
        let start = self.store.count();
        for value in values {
            self.store.append(value.as_ref(), self.secure, &self.engine);
        }
        let added = start..self.store.count();
        debug!(added = added.len(), total = self.store.count(), "appended leaves");
        added
    }

    pub fn leaf_count(&self) -> usize {
        self.store.count()
    }

    /// Stored bytes of the leaf at `index`
    pub fn get_leaf(&self, index: usize) -> Result<&ByteString> {
        self.store.get(index)
    }

    /// The bytes `value` would be stored as
    pub fn convert_value(&self, value: impl AsRef<[u8]>) -> ByteString {
        if self.secure {
            self.engine.digest(value.as_ref())
        } else {
            ByteString::from_slice(value.as_ref())
        }
    }

    /// Build the tree now, reusing the cached build when the leaves are unchanged
    pub fn build_tree(&mut self) -> Result<&Tree> {
        self.builder.build_from_store(&self.store)
    }

    /// Drop every leaf and the cached tree
    pub fn reset_tree(&mut self) {
        debug!(dropped = self.store.count(), "resetting merkle tree");
        self.store.reset();
        self.builder.invalidate();
    }

    /// Root digest, building first if needed
    pub fn root(&mut self) -> Result<ByteString> {
        Ok(self.build_tree()?.root().clone())
    }

    /// Inclusion proof for the leaf at `index`, building first if needed
    pub fn inclusion_proof(&mut self, index: usize) -> Result<Proof> {
        if index >= self.store.count() {
            return Err(MerkleError::index_out_of_range(index, self.store.count()));
        }
        let tree = self.build_tree()?;
        ProofGenerator::new(tree).prove_inclusion(index)
    }

    /// Verify a proof with this tree's algorithm.
    ///
    /// The proof is checked against its own claimed root; the tree's leaves
    /// are not consulted.
    pub fn verify_inclusion_proof(&self, proof: &Proof) -> Result<bool> {
        ProofVerifier::new(self.engine).verify(proof)
    }

    pub fn exclusion_proof(&mut self, _value: impl AsRef<[u8]>) -> Result<Proof> {
        Err(MerkleError::not_implemented("exclusion proof"))
    }

    pub fn verify_exclusion_proof(&self, _proof: &Proof) -> Result<bool> {
        Err(MerkleError::not_implemented("exclusion proof verification"))
    }

    /// Whether a tree matching the current leaves is cached
    pub fn is_built(&self) -> bool {
        self.builder.cached(&self.store).is_some()
    }

    /// The cached tree, if one matches the current leaves
    pub fn built_tree(&self) -> Option<&Tree> {
        self.builder.cached(&self.store)
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.engine.algorithm()
    }
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::from_config(&TreeConfig::default())
    }
}

impl fmt::Display for MerkleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.built_tree() {
            Some(tree) => write!(f, "{}", tree),
            None => write!(f, "Tree not ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::sha256;

    #[test]
    fn test_default_is_secure_sha256() {
        let tree = MerkleTree::default();
        assert!(tree.is_secure());
        assert_eq!(tree.algorithm(), HashAlgorithm::Sha256);
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_new_rejects_unknown_algorithm() {
        match MerkleTree::new(true, "whirlpool") {
            Err(MerkleError::UnsupportedAlgorithm { algorithm }) => assert_eq!(algorithm, "whirlpool"),
            other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
        }
    }

    #[test]
    fn test_add_leaves_returns_index_range() {
        let mut tree = MerkleTree::default();
        assert_eq!(tree.add_leaf("first"), 0);
        assert_eq!(tree.add_leaves(["a", "b", "c"]), 1..4);
        assert_eq!(tree.add_leaves(Vec::<Vec<u8>>::new()), 4..4);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_secure_mode_stores_digest() {
        let mut secure = MerkleTree::default();
        let mut raw = MerkleTree::with_algorithm(false, HashAlgorithm::Sha256);
        secure.add_leaf("hello");
        raw.add_leaf("hello");

        assert_eq!(secure.get_leaf(0).unwrap(), &sha256(b"hello"));
        assert_eq!(raw.get_leaf(0).unwrap().as_bytes(), b"hello");
        assert_eq!(secure.convert_value("hello"), sha256(b"hello"));
    }

    #[test]
    fn test_mutation_invalidates_build() {
        let mut tree = MerkleTree::default();
        tree.add_leaves(["a", "b"]);
        assert!(!tree.is_built());

        let first = tree.root().unwrap();
        assert!(tree.is_built());

        tree.add_leaf("c");
        assert!(!tree.is_built());
        assert_ne!(tree.root().unwrap(), first);
    }

    #[test]
    fn test_root_of_empty_tree() {
        let mut tree = MerkleTree::default();
        assert!(matches!(tree.root(), Err(MerkleError::EmptyTree)));

        tree.add_leaf("x");
        tree.root().unwrap();
        tree.reset_tree();
        assert_eq!(tree.leaf_count(), 0);
        assert!(matches!(tree.root(), Err(MerkleError::EmptyTree)));
    }

    #[test]
    fn test_proof_index_out_of_range() {
        let mut tree = MerkleTree::default();
        assert!(matches!(
            tree.inclusion_proof(0),
            Err(MerkleError::IndexOutOfRange { index: 0, count: 0 })
        ));
        tree.add_leaves(["a", "b", "c"]);
        assert!(matches!(
            tree.inclusion_proof(3),
            Err(MerkleError::IndexOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_proofs_outlive_reset() {
        let mut tree = MerkleTree::default();
        tree.add_leaves(["tierion", "bitcoin", "blockchain"]);
        let proof = tree.inclusion_proof(1).unwrap();

        tree.reset_tree();
        assert!(tree.verify_inclusion_proof(&proof).unwrap());
    }

    #[test]
    fn test_exclusion_is_not_implemented() {
        let mut tree = MerkleTree::default();
        tree.add_leaf("a");
        let proof = tree.inclusion_proof(0).unwrap();

        assert!(matches!(
            tree.exclusion_proof("b"),
            Err(MerkleError::NotImplemented { .. })
        ));
        assert!(matches!(
            tree.verify_exclusion_proof(&proof),
            Err(MerkleError::NotImplemented { .. })
        ));
    }

    #[test]
    fn test_display_before_and_after_build() {
        let mut tree = MerkleTree::with_algorithm(false, HashAlgorithm::Sha256);
        tree.add_leaves([[0x01u8], [0x02u8]]);
        assert_eq!(tree.to_string(), "Tree not ready");

        tree.build_tree().unwrap();
        assert!(tree.to_string().ends_with("1: [01, 02]\n"));
    }
}
