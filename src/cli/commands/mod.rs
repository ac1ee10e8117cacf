//! CLI command implementations

pub mod config;
pub mod inspect;
pub mod leaf;
pub mod prove;
pub mod root;
pub mod verify;

use crate::cli::{input, CliContext, InputFormat};
use crate::tree::MerkleTree;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Read the leaves in `path` into a tree built with the effective settings
pub fn load_tree(ctx: &CliContext, path: &Path, format: InputFormat) -> Result<MerkleTree> {
    let leaves = input::read_leaves(path, format)?;
    debug!(path = %path.display(), leaves = leaves.len(), "read leaves");

    let mut tree = ctx.new_tree();
    tree.add_leaves(&leaves);
    Ok(tree)
}
