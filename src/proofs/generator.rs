//! Inclusion proof generation

use crate::core::error::*;
use crate::proofs::proof::{Proof, ProofElement, Side};
use crate::tree::builder::Tree;
use tracing::debug;

/// Proof generator reading the levels of a built tree
pub struct ProofGenerator<'a> {
    tree: &'a Tree,
}

impl<'a> ProofGenerator<'a> {
    /// Create a new proof generator
    pub fn new(tree: &'a Tree) -> Self {
        Self { tree }
    }

    /// Generate a proof of inclusion for the leaf at `index`
    pub fn prove_inclusion(&self, index: usize) -> Result<Proof> {
        let path = self.sibling_path(index)?;
        let leaf = self.tree.leaves()[index].clone();

        debug!(index, siblings = path.len(), "generated inclusion proof");

        Ok(Proof::new_inclusion(
            leaf,
            self.tree.root().clone(),
            path,
            index as u64,
            self.tree.leaf_count() as u64,
            self.tree.algorithm(),
        ))
    }

    /// Siblings from leaf level up to, but excluding, the root
    pub fn sibling_path(&self, index: usize) -> Result<Vec<ProofElement>> {
        let leaf_count = self.tree.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::index_out_of_range(index, leaf_count));
        }

        let levels = self.tree.levels();
        let mut path = Vec::with_capacity(levels.len() - 1);
        let mut position = index;

        for level in &levels[..levels.len() - 1] {
            let side = if position % 2 == 1 { Side::Left } else { Side::Right };
            // The unpaired last node of an odd level is its own sibling
            let sibling = level.get(position ^ 1).unwrap_or(&level[position]);
            path.push(ProofElement::new(side, sibling.clone()));
            position /= 2;
        }

        Ok(path)
    }
}
