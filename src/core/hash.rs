//! Hash utilities for mtree
//!
//! [`HashEngine`] wraps one algorithm out of the closed [`HashAlgorithm`] set.
//! MD5 comes from `md-5` and the SHA-2 family from `sha2`, both through the
//! shared `digest` trait. SHA-3 and Keccak come from `tiny-keccak`, BLAKE3
//! from `blake3`.
//!
//! MD5 is kept for compatibility with existing trees; it is not collision
//! resistant and should not anchor new ones.

use crate::core::error::{MerkleError, Result};
use crate::core::types::ByteString;
use digest::Digest;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher as KeccakHasher, Keccak, Sha3};

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    Md5,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Keccak256,
    Blake3,
}

impl HashAlgorithm {
    /// Every supported algorithm, in declaration order
    pub const ALL: [HashAlgorithm; 11] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Keccak256,
        HashAlgorithm::Blake3,
    ];

    /// Canonical identifier
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_224 => "sha3_224",
            HashAlgorithm::Sha3_256 => "sha3_256",
            HashAlgorithm::Sha3_384 => "sha3_384",
            HashAlgorithm::Sha3_512 => "sha3_512",
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes
    pub fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha3_224 => 28,
            HashAlgorithm::Sha256
            | HashAlgorithm::Sha3_256
            | HashAlgorithm::Keccak256
            | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let algorithm = match normalized.as_str() {
            "md5" | "md_5" => HashAlgorithm::Md5,
            "sha224" | "sha_224" => HashAlgorithm::Sha224,
            "sha256" | "sha_256" => HashAlgorithm::Sha256,
            "sha384" | "sha_384" => HashAlgorithm::Sha384,
            "sha512" | "sha_512" => HashAlgorithm::Sha512,
            "sha3_224" => HashAlgorithm::Sha3_224,
            "sha3_256" => HashAlgorithm::Sha3_256,
            "sha3_384" => HashAlgorithm::Sha3_384,
            "sha3_512" => HashAlgorithm::Sha3_512,
            "keccak256" | "keccak_256" => HashAlgorithm::Keccak256,
            "blake3" => HashAlgorithm::Blake3,
            _ => return Err(MerkleError::unsupported_algorithm(s)),
        };
        Ok(algorithm)
    }
}

impl Serialize for HashAlgorithm {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let identifier = String::deserialize(deserializer)?;
        identifier.parse().map_err(serde::de::Error::custom)
    }
}

/// Stateless digest function over byte strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashEngine {
    algorithm: HashAlgorithm,
}

impl HashEngine {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Resolve an algorithm identifier, failing fast on unknown names
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        identifier.parse().map(Self::new)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn output_size(&self) -> usize {
        self.algorithm.output_size()
    }

    /// Digest a single byte string
    pub fn digest(&self, data: &[u8]) -> ByteString {
        self.digest_parts(&[data])
    }

    /// Digest `left ‖ right`, the node combination rule
    pub fn digest_pair(&self, left: &[u8], right: &[u8]) -> ByteString {
        self.digest_parts(&[left, right])
    }

    fn digest_parts(&self, parts: &[&[u8]]) -> ByteString {
        let bytes = match self.algorithm {
            HashAlgorithm::Md5 => digest_parts_with::<Md5>(parts),
            HashAlgorithm::Sha224 => digest_parts_with::<Sha224>(parts),
            HashAlgorithm::Sha256 => digest_parts_with::<Sha256>(parts),
            HashAlgorithm::Sha384 => digest_parts_with::<Sha384>(parts),
            HashAlgorithm::Sha512 => digest_parts_with::<Sha512>(parts),
            HashAlgorithm::Sha3_224 => keccak_parts(Sha3::v224(), 28, parts),
            HashAlgorithm::Sha3_256 => keccak_parts(Sha3::v256(), 32, parts),
            HashAlgorithm::Sha3_384 => keccak_parts(Sha3::v384(), 48, parts),
            HashAlgorithm::Sha3_512 => keccak_parts(Sha3::v512(), 64, parts),
            HashAlgorithm::Keccak256 => keccak_parts(Keccak::v256(), 32, parts),
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().as_bytes().to_vec()
            }
        };
        ByteString::new(bytes)
    }
}

fn digest_parts_with<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

fn keccak_parts<H: KeccakHasher>(mut hasher: H, output_size: usize, parts: &[&[u8]]) -> Vec<u8> {
    for part in parts {
        hasher.update(part);
    }
    let mut output = vec![0u8; output_size];
    hasher.finalize(&mut output);
    output
}

/// Compute SHA-256 of data
pub fn sha256(data: &[u8]) -> ByteString {
    HashEngine::new(HashAlgorithm::Sha256).digest(data)
}
