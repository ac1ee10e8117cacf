//! Inspect command implementation

use crate::cli::{commands::load_tree, CliContext, InputFormat};
use crate::core::types::ByteString;
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

/// Execute the inspect command
pub fn execute(ctx: &CliContext, input: &Path, input_format: InputFormat, json: bool) -> Result<()> {
    let mut tree = load_tree(ctx, input, input_format)?;
    let built = tree.build_tree()?;

    if json {
        let levels: Vec<Vec<String>> = built
            .levels()
            .iter()
            .map(|level| level.iter().map(ByteString::to_hex).collect())
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "root": built.root().to_hex(),
                "algorithm": built.algorithm().as_str(),
                "leaf_count": built.leaf_count(),
                "depth": built.depth(),
                "levels": levels,
            }))?
        );
        return Ok(());
    }

    println!("{}", "Merkle Tree".green().bold());
    println!("{}", "═".repeat(50).green());
    println!("{}: {}", "Algorithm".bold(), built.algorithm());
    println!("{}: {}", "Leaves".bold(), built.leaf_count());
    println!("{}: {}", "Depth".bold(), built.depth());
    println!("{}: {}", "Root Hash".bold(), built.root().to_hex().cyan());
    println!();
    print!("{}", built);

    Ok(())
}
