//! Core data types for mtree

use crate::core::error::{MerkleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owned, opaque byte string used for leaves, nodes and proof entries.
///
/// Human-readable formats (JSON, TOML, `Display`) render it as lowercase hex;
/// binary formats store the raw bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    /// Wrap an owned byte vector
    pub fn new(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }

    /// Copy a byte slice
    pub fn from_slice(bytes: &[u8]) -> Self {
        ByteString(bytes.to_vec())
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the underlying vector
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode a hex string, rejecting anything that is not hex with `TypeMismatch`
    pub fn from_hex(hex: &str) -> Result<Self> {
        hex::decode(hex.trim())
            .map(ByteString)
            .map_err(|e| MerkleError::type_mismatch("hex-encoded byte string", format!("{:?} ({})", hex, e)))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        if hex.len() > 16 {
            write!(f, "ByteString({}..)", &hex[..16])
        } else {
            write!(f, "ByteString({})", hex)
        }
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        ByteString::from_slice(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for ByteString {
    fn from(bytes: [u8; N]) -> Self {
        ByteString(bytes.to_vec())
    }
}

impl From<ByteString> for Vec<u8> {
    fn from(bytes: ByteString) -> Self {
        bytes.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for ByteString {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<&[u8]> for ByteString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

impl Serialize for ByteString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for ByteString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex_string = String::deserialize(deserializer)?;
            hex::decode(&hex_string)
                .map(ByteString)
                .map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer).map(ByteString)
        }
    }
}

/// Leaf values arriving as JSON.
///
/// Accepts a string (its UTF-8 bytes) or an array of integers in `0..=255`.
/// Structured values must be flattened by the caller before they get here.
impl TryFrom<&serde_json::Value> for ByteString {
    type Error = MerkleError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(ByteString::from_slice(s.as_bytes())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| MerkleError::type_mismatch("byte (0..=255)", json_shape(item)))
                })
                .collect::<Result<Vec<u8>>>()
                .map(ByteString),
            other => Err(MerkleError::type_mismatch("byte string", json_shape(other))),
        }
    }
}

fn json_shape(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(map) => format!("object with {} keys", map.len()),
    }
}
