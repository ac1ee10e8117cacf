//! mtree CLI
//!
//! Command-line interface for building Merkle trees and checking inclusion proofs.

use anyhow::Result;
use clap::Parser;
use mtree::cli::{commands, CliContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = CliContext::from_cli(&cli)?;

    // Execute the command
    match cli.command {
        Commands::Root { input, input_format, json } => {
            commands::root::execute(&ctx, &input, input_format, json)
        }
        Commands::Prove { input, index, input_format, output, format, compact } => {
            commands::prove::execute(
                &ctx,
                commands::prove::ProveArgs {
                    input: &input,
                    index,
                    input_format,
                    output,
                    format,
                    compact,
                },
            )
        }
        Commands::Verify { proof, root, format } => {
            commands::verify::execute(&ctx, &proof, root.as_deref(), format)
        }
        Commands::Inspect { input, input_format, json } => {
            commands::inspect::execute(&ctx, &input, input_format, json)
        }
        Commands::Leaf { input, index, input_format } => {
            commands::leaf::execute(&ctx, &input, index, input_format)
        }
        Commands::Config { action } => commands::config::execute(&ctx, action),
    }
}
