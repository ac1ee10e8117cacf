//! Verify command implementation

use crate::cli::{input::read_source, CliContext};
use crate::config::ProofFormat;
use crate::core::{hash::HashEngine, types::ByteString};
use crate::proofs::{Proof, ProofVerifier};
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;
use tracing::debug;

/// Execute the verify command
pub fn execute(
    ctx: &CliContext,
    proof_path: &Path,
    root: Option<&str>,
    format: Option<ProofFormat>,
) -> Result<()> {
    let data = read_source(proof_path)?;
    let proof = decode_proof(&data, format)?;

    // Without an explicit algorithm the proof's own is trusted, then the configured one
    let algorithm = ctx
        .algorithm_override
        .or(proof.algorithm())
        .unwrap_or(ctx.config.tree.algorithm);
    let verifier = ProofVerifier::new(HashEngine::new(algorithm));
    let mut valid = verifier.verify(&proof)?;

    if let Some(expected) = root {
        let expected = ByteString::from_hex(expected.trim())?;
        if expected != proof.claimed_root {
            debug!(claimed = %proof.claimed_root, expected = %expected, "root mismatch");
            valid = false;
        }
    }

    if !valid {
        if !ctx.quiet {
            println!("{} Proof is invalid", "✗".red());
        }
        match proof.leaf_index() {
            Some(index) => bail!("proof for leaf {} did not verify", index),
            None => bail!("proof did not verify"),
        }
    }

    if !ctx.quiet {
        println!("{} Proof is valid", "✓".green());
        if let Some(metadata) = &proof.metadata {
            println!("  • Leaf: {} of {}", metadata.leaf_index, metadata.leaf_count);
        }
        println!("  • Algorithm: {}", algorithm);
        println!("  • Root: {}", proof.claimed_root.to_hex().cyan());
    }
    Ok(())
}

/// Decode a proof, detecting JSON versus binary when `format` is not given
pub fn decode_proof(data: &[u8], format: Option<ProofFormat>) -> Result<Proof> {
    let format = format.unwrap_or_else(|| {
        match data.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => ProofFormat::Json,
            _ => ProofFormat::Binary,
        }
    });

    match format {
        ProofFormat::Json => {
            let text = std::str::from_utf8(data)?;
            Ok(Proof::from_json(text)?)
        }
        ProofFormat::Binary => Ok(Proof::from_bytes(data)?),
        ProofFormat::Text => bail!("text proofs are for reading only; use json or binary"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MerkleTree;

    fn sample() -> Proof {
        let mut tree = MerkleTree::default();
        tree.add_leaves(["x", "y", "z", "w"]);
        tree.inclusion_proof(1).unwrap()
    }

    #[test]
    fn test_detects_json_and_binary() {
        let proof = sample();
        let json = format!("  \n{}", proof.to_json().unwrap());
        assert_eq!(decode_proof(json.as_bytes(), None).unwrap(), proof);
        assert_eq!(decode_proof(&proof.to_bytes().unwrap(), None).unwrap(), proof);
    }

    #[test]
    fn test_text_cannot_be_decoded() {
        let text = sample().to_text();
        assert!(decode_proof(text.as_bytes(), Some(ProofFormat::Text)).is_err());
    }
}
