//! Thread-safe tree handle

use crate::core::{
    error::*,
    hash::{HashAlgorithm, HashEngine},
    types::ByteString,
};
use crate::proofs::{Proof, ProofVerifier};
use crate::tree::handle::MerkleTree;
use parking_lot::Mutex;
use std::ops::Range;
use std::sync::Arc;

/// A [`MerkleTree`] behind a single lock, cloneable across threads.
///
/// Every call that reads or mutates leaves takes the lock for its full
/// duration, so a proof always matches the leaves present when it was
/// generated. Verification needs only the engine and never locks.
#[derive(Debug, Clone)]
pub struct SharedMerkleTree {
    inner: Arc<Mutex<MerkleTree>>,
    // A tree's algorithm is fixed at construction
    engine: HashEngine,
}

impl SharedMerkleTree {
    pub fn new(tree: MerkleTree) -> Self {
        Self {
            engine: HashEngine::new(tree.algorithm()),
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    /// Run `f` with exclusive access to the tree
    pub fn with<R>(&self, f: impl FnOnce(&mut MerkleTree) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn add_leaf(&self, value: impl AsRef<[u8]>) -> usize {
        self.inner.lock().add_leaf(value)
    }

    pub fn add_leaves<I>(&self, values: I) -> Range<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.inner.lock().add_leaves(values)
    }

    pub fn leaf_count(&self) -> usize {
        self.inner.lock().leaf_count()
    }

    pub fn get_leaf(&self, index: usize) -> Result<ByteString> {
        self.inner.lock().get_leaf(index).cloned()
    }

    pub fn build_tree(&self) -> Result<()> {
        self.inner.lock().build_tree().map(|_| ())
    }

    pub fn reset_tree(&self) {
        self.inner.lock().reset_tree()
    }

    pub fn root(&self) -> Result<ByteString> {
        self.inner.lock().root()
    }

    pub fn inclusion_proof(&self, index: usize) -> Result<Proof> {
        self.inner.lock().inclusion_proof(index)
    }

    pub fn verify_inclusion_proof(&self, proof: &Proof) -> Result<bool> {
        ProofVerifier::new(self.engine).verify(proof)
    }

    pub fn is_built(&self) -> bool {
        self.inner.lock().is_built()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.engine.algorithm()
    }

    /// Unwrap the tree if this is the last handle
    pub fn into_inner(self) -> std::result::Result<MerkleTree, Self> {
        let engine = self.engine;
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner, engine })
    }
}

impl Default for SharedMerkleTree {
    fn default() -> Self {
        Self::new(MerkleTree::default())
    }
}

impl From<MerkleTree> for SharedMerkleTree {
    fn from(tree: MerkleTree) -> Self {
        Self::new(tree)
    }
}
