//! Merkle tree construction
//!
//! Levels are built bottom-up: level 0 holds the leaves as stored, each
//! following level pairs adjacent nodes left to right and digests
//! `left ‖ right`. An odd level pairs its last node with itself. Construction
//! stops at a single node, the root.

use crate::core::{error::*, hash::HashAlgorithm, hash::HashEngine, types::ByteString};
use crate::tree::leaf_store::LeafStore;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, trace};

/// Levels at or above this width are digested in parallel
const PARALLEL_LEVEL_WIDTH: usize = 4096;

/// A fully materialized Merkle tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// All levels of the tree (leaves at index 0, root last)
    levels: Vec<Vec<ByteString>>,
    algorithm: HashAlgorithm,
}

impl Tree {
    /// Root digest
    pub fn root(&self) -> &ByteString {
        // A tree is only ever constructed with a non-empty top level
        &self.levels[self.levels.len() - 1][0]
    }

    pub fn levels(&self) -> &[Vec<ByteString>] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&[ByteString]> {
        self.levels.get(index).map(Vec::as_slice)
    }

    pub fn leaves(&self) -> &[ByteString] {
        &self.levels[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels, leaves and root included
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, level) in self.levels.iter().rev().enumerate() {
            let nodes: Vec<String> = level.iter().map(ByteString::to_hex).collect();
            writeln!(f, "{}: [{}]", depth, nodes.join(", "))?;
        }
        Ok(())
    }
}

/// Snapshot identity of the leaf store a tree was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheKey {
    pub generation: u64,
    pub leaf_count: usize,
}

impl CacheKey {
    pub fn of(store: &LeafStore) -> Self {
        Self {
            generation: store.generation(),
            leaf_count: store.count(),
        }
    }
}

/// Build state of a tree handle
#[derive(Debug, Clone, Default)]
pub enum TreeState {
    #[default]
    Unbuilt,
    Built { key: CacheKey, tree: Tree },
}

impl TreeState {
    pub fn tree(&self) -> Option<&Tree> {
        match self {
            TreeState::Built { tree, .. } => Some(tree),
            TreeState::Unbuilt => None,
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, TreeState::Built { .. })
    }
}

/// Builds trees from leaf snapshots and memoizes the last result
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    engine: HashEngine,
    state: TreeState,
}

impl TreeBuilder {
    pub fn new(engine: HashEngine) -> Self {
        Self {
            engine,
            state: TreeState::Unbuilt,
        }
    }

    pub fn engine(&self) -> &HashEngine {
        &self.engine
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// Build a tree from an ordered leaf sequence, without touching the cache
    pub fn build(&self, leaves: &[ByteString]) -> Result<Tree> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut levels = vec![leaves.to_vec()];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next = self.next_level(current);
            trace!(width = next.len(), "computed level {}", levels.len());
            levels.push(next);
        }

        debug!(
            leaves = leaves.len(),
            depth = levels.len(),
            algorithm = %self.engine.algorithm(),
            "built merkle tree"
        );

        Ok(Tree {
            levels,
            algorithm: self.engine.algorithm(),
        })
    }

    /// Build from a leaf store, reusing the cached tree while the store is unchanged
    pub fn build_from_store(&mut self, store: &LeafStore) -> Result<&Tree> {
        let key = CacheKey::of(store);
        let fresh = matches!(
            &self.state,
            TreeState::Built { key: cached, .. } if *cached == key
        );

        if !fresh {
            let tree = self.build(store.snapshot())?;
            self.state = TreeState::Built { key, tree };
        } else {
            trace!(generation = key.generation, "reusing cached merkle tree");
        }

        self.state.tree().ok_or(MerkleError::EmptyTree)
    }

    /// The cached tree, if it still matches `store`
    pub fn cached(&self, store: &LeafStore) -> Option<&Tree> {
        match &self.state {
            TreeState::Built { key, tree } if *key == CacheKey::of(store) => Some(tree),
            _ => None,
        }
    }

    /// Drop the cached tree
    pub fn invalidate(&mut self) {
        if self.state.is_built() {
            trace!("invalidating cached merkle tree");
        }
        self.state = TreeState::Unbuilt;
    }

    fn next_level(&self, level: &[ByteString]) -> Vec<ByteString> {
        let combine = |pair: &[ByteString]| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            self.engine.digest_pair(left.as_bytes(), right.as_bytes())
        };

        if level.len() >= PARALLEL_LEVEL_WIDTH {
            level.par_chunks(2).map(combine).collect()
        } else {
            level.chunks(2).map(combine).collect()
        }
    }
}
