//! Leaf command implementation

use crate::cli::{commands::load_tree, CliContext, InputFormat};
use anyhow::Result;
use std::path::Path;

/// Print the stored bytes of one leaf as hex
pub fn execute(ctx: &CliContext, input: &Path, index: usize, input_format: InputFormat) -> Result<()> {
    let tree = load_tree(ctx, input, input_format)?;
    println!("{}", tree.get_leaf(index)?.to_hex());
    Ok(())
}
