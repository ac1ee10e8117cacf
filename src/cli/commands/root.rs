//! Root command implementation

use crate::cli::{commands::load_tree, CliContext, InputFormat};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

/// Execute the root command
pub fn execute(ctx: &CliContext, input: &Path, input_format: InputFormat, json: bool) -> Result<()> {
    let mut tree = load_tree(ctx, input, input_format)?;
    let root = tree.root()?;

    if json {
        println!(
            "{}",
            json!({
                "root": root.to_hex(),
                "leaf_count": tree.leaf_count(),
                "algorithm": tree.algorithm().as_str(),
                "secure": tree.is_secure(),
            })
        );
    } else if ctx.quiet {
        println!("{}", root.to_hex());
    } else {
        println!("{}: {}", "Root Hash".bold(), root.to_hex().cyan());
        println!("{}: {}", "Leaves".bold(), tree.leaf_count());
        println!("{}: {}", "Algorithm".bold(), tree.algorithm());
        println!("{}: {}", "Secure".bold(), tree.is_secure());
    }

    Ok(())
}
