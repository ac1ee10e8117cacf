//! Reading leaves from files and stdin

use crate::core::{error::MerkleError, types::ByteString};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Read;
use std::path::Path;

/// Layout of a leaf file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One leaf per line, taken as UTF-8 bytes
    Lines,
    /// One hex-encoded leaf per line
    Hex,
    /// A JSON array of strings or byte arrays
    Json,
}

/// Read a whole file, or stdin when `path` is `-`
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Read and decode the leaves in `path`
pub fn read_leaves(path: &Path, format: InputFormat) -> Result<Vec<ByteString>> {
    let content = read_source(path)?;
    Ok(parse_leaves(&content, format)?)
}

/// Decode leaves from file content
pub fn parse_leaves(content: &[u8], format: InputFormat) -> Result<Vec<ByteString>, MerkleError> {
    match format {
        InputFormat::Lines => Ok(content
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(ByteString::from)
            .collect()),
        InputFormat::Hex => {
            let text = std::str::from_utf8(content)
                .map_err(|_| MerkleError::type_mismatch("hex text", "non-UTF-8 input"))?;
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ByteString::from_hex)
                .collect()
        }
        InputFormat::Json => {
            let value: serde_json::Value = serde_json::from_slice(content)
                .map_err(|e| MerkleError::type_mismatch("JSON array", format!("invalid JSON ({})", e)))?;
            let items = value
                .as_array()
                .ok_or_else(|| MerkleError::type_mismatch("JSON array", "non-array JSON"))?;
            items.iter().map(ByteString::try_from).collect()
        }
    }
}
