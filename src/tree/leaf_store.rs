//! Append-only leaf storage

use crate::core::{error::*, hash::HashEngine, types::ByteString};

/// Ordered, append-only sequence of leaves with stable indices.
///
/// Every successful [`append`](LeafStore::append) or [`reset`](LeafStore::reset)
/// bumps the generation counter, which the builder uses to key its cache.
#[derive(Debug, Clone, Default)]
pub struct LeafStore {
    leaves: Vec<ByteString>,
    generation: u64,
}

impl LeafStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a leaf, storing its digest when `hash_first` is set.
    /// Returns the index of the new leaf.
    pub fn append(&mut self, value: &[u8], hash_first: bool, engine: &HashEngine) -> usize {
        let leaf = if hash_first {
            engine.digest(value)
        } else {
            ByteString::from_slice(value)
        };
        self.leaves.push(leaf);
        self.generation += 1;
        self.leaves.len() - 1
    }

    /// Get the leaf at `index`
    pub fn get(&self, index: usize) -> Result<&ByteString> {
        self.leaves
            .get(index)
            .ok_or_else(|| MerkleError::index_out_of_range(index, self.leaves.len()))
    }

    pub fn count(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Drop every leaf
    pub fn reset(&mut self) {
        self.leaves.clear();
        self.generation += 1;
    }

    /// Borrow the current leaves in index order
    pub fn snapshot(&self) -> &[ByteString] {
        &self.leaves
    }

    /// Mutation counter
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
