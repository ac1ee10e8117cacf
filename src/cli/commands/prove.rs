//! Prove command implementation

use crate::cli::{commands::load_tree, CliContext, InputFormat};
use crate::config::ProofFormat;
use crate::proofs::Proof;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ProveArgs<'a> {
    pub input: &'a Path,
    pub index: usize,
    pub input_format: InputFormat,
    pub output: Option<PathBuf>,
    pub format: Option<ProofFormat>,
    pub compact: bool,
}

/// Execute the prove command
pub fn execute(ctx: &CliContext, args: ProveArgs<'_>) -> Result<()> {
    let mut tree = load_tree(ctx, args.input, args.input_format)?;
    let proof = tree.inclusion_proof(args.index)?;
    let format = args.format.unwrap_or(ctx.config.output.format);

    output_proof(ctx, &proof, args.index, format, args.compact, args.output.as_deref())
}

/// Encode a proof in `format`
pub fn encode_proof(proof: &Proof, format: ProofFormat, compact: bool) -> Result<Vec<u8>> {
    Ok(match format {
        ProofFormat::Json if compact => proof.to_json_compact()?.into_bytes(),
        ProofFormat::Json => proof.to_json()?.into_bytes(),
        ProofFormat::Binary => proof.to_bytes()?,
        ProofFormat::Text => proof.to_text().into_bytes(),
    })
}

fn output_proof(
    ctx: &CliContext,
    proof: &Proof,
    index: usize,
    format: ProofFormat,
    compact: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut proof_data = encode_proof(proof, format, compact)?;

    match output {
        Some(output_path) => {
            std::fs::write(output_path, &proof_data)?;
            if !ctx.quiet {
                eprintln!(
                    "{} Proof for leaf {} written to {}",
                    "✓".green(),
                    index,
                    output_path.display().to_string().cyan()
                );
            }
        }
        None => {
            if format == ProofFormat::Json && !proof_data.ends_with(b"\n") {
                proof_data.push(b'\n');
            }
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&proof_data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
