//! Inclusion proof verification
//!
//! Verification recomputes the root from the target leaf and the sibling
//! path and compares it bytewise with the claimed root. A proof that is
//! structurally inconsistent fails with `MalformedProof` instead of returning
//! `false`, so callers can tell a forged or stale proof from a broken one.

use crate::core::{error::*, hash::HashEngine, types::ByteString};
use crate::proofs::proof::{
    Proof, ProofElement, ProofMetadata, Side, INCLUSION_PROOF_TYPE, PROOF_FORMAT_VERSION,
};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Number of siblings a proof over `leaf_count` leaves must carry
pub fn expected_path_len(leaf_count: u64) -> usize {
    if leaf_count <= 1 {
        0
    } else {
        (u64::BITS - (leaf_count - 1).leading_zeros()) as usize
    }
}

/// Stateless proof verifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofVerifier {
    engine: HashEngine,
}

impl ProofVerifier {
    pub fn new(engine: HashEngine) -> Self {
        Self { engine }
    }

    /// Verify a proof against its own claimed root
    pub fn verify(&self, proof: &Proof) -> Result<bool> {
        self.check_structure(proof)?;

        let computed = self.compute_root(&proof.target_leaf, &proof.path);
        let valid = computed == proof.claimed_root;

        debug!(leaf_index = ?proof.leaf_index(), valid, "verified inclusion proof");
        Ok(valid)
    }

    /// Verify independent proofs in parallel, one result per proof
    pub fn verify_all(&self, proofs: &[Proof]) -> Vec<Result<bool>> {
        proofs.par_iter().map(|proof| self.verify(proof)).collect()
    }

    /// Fold a sibling path into a root
    pub fn compute_root(&self, leaf: &ByteString, path: &[ProofElement]) -> ByteString {
        let mut current = leaf.clone();
        for element in path {
            current = match element.side {
                Side::Right => self.engine.digest_pair(current.as_bytes(), element.digest.as_bytes()),
                Side::Left => self.engine.digest_pair(element.digest.as_bytes(), current.as_bytes()),
            };
        }
        current
    }

    fn check_structure(&self, proof: &Proof) -> Result<()> {
        if proof.version != PROOF_FORMAT_VERSION {
            return Err(MerkleError::malformed_proof(format!(
                "unsupported proof version {:?}",
                proof.version
            )));
        }
        if proof.proof_type != INCLUSION_PROOF_TYPE {
            return Err(MerkleError::malformed_proof(format!(
                "expected proof type {}, found {:?}",
                INCLUSION_PROOF_TYPE, proof.proof_type
            )));
        }
        if let Some(metadata) = &proof.metadata {
            self.check_position(proof, metadata)?;
        }

        let digest_size = self.engine.output_size();
        // Level 0 siblings are leaves and may be raw bytes of any length
        for (level, element) in proof.path.iter().enumerate().skip(1) {
            if element.digest.len() != digest_size {
                return Err(MerkleError::malformed_proof(format!(
                    "sibling at level {} is {} bytes, expected {}",
                    level,
                    element.digest.len(),
                    digest_size
                )));
            }
        }

        if !proof.path.is_empty() && proof.claimed_root.len() != digest_size {
            return Err(MerkleError::malformed_proof(format!(
                "claimed root is {} bytes, expected {}",
                proof.claimed_root.len(),
                digest_size
            )));
        }

        trace!(siblings = proof.path.len(), "proof structure accepted");
        Ok(())
    }

    /// Checks that need the recorded leaf position and algorithm
    fn check_position(&self, proof: &Proof, metadata: &ProofMetadata) -> Result<()> {
        if metadata.algorithm != self.engine.algorithm() {
            return Err(MerkleError::malformed_proof(format!(
                "proof uses {}, verifier uses {}",
                metadata.algorithm,
                self.engine.algorithm()
            )));
        }

        let leaf_index = metadata.leaf_index;
        let leaf_count = metadata.leaf_count;
        if leaf_index >= leaf_count {
            return Err(MerkleError::malformed_proof(format!(
                "leaf index {} outside a tree of {} leaves",
                leaf_index, leaf_count
            )));
        }

        let expected_len = expected_path_len(leaf_count);
        if proof.path.len() != expected_len {
            return Err(MerkleError::malformed_proof(format!(
                "path has {} siblings, a tree of {} leaves needs {}",
                proof.path.len(),
                leaf_count,
                expected_len
            )));
        }

        for (level, element) in proof.path.iter().enumerate() {
            let expected_side = if (leaf_index >> level) & 1 == 1 {
                Side::Left
            } else {
                Side::Right
            };
            if element.side != expected_side {
                return Err(MerkleError::malformed_proof(format!(
                    "sibling at level {} is tagged {}, leaf index {} requires {}",
                    level,
                    element.side.as_str(),
                    leaf_index,
                    expected_side.as_str()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::HashAlgorithm;
    use crate::proofs::generator::ProofGenerator;
    use crate::tree::builder::TreeBuilder;

    fn proof_for(count: usize, index: usize) -> Proof {
        let engine = HashEngine::default();
        let leaves: Vec<ByteString> = (0..count as u32).map(|i| engine.digest(&i.to_le_bytes())).collect();
        let tree = TreeBuilder::new(engine).build(&leaves).unwrap();
        ProofGenerator::new(&tree).prove_inclusion(index).unwrap()
    }

    #[test]
    fn test_expected_path_len() {
        assert_eq!(expected_path_len(1), 0);
        assert_eq!(expected_path_len(2), 1);
        assert_eq!(expected_path_len(3), 2);
        assert_eq!(expected_path_len(4), 2);
        assert_eq!(expected_path_len(5), 3);
        assert_eq!(expected_path_len(1 << 20), 20);
        assert_eq!(expected_path_len((1 << 20) + 1), 21);
    }

    #[test]
    fn test_valid_proofs_verify() {
        let verifier = ProofVerifier::default();
        for count in 1..=9 {
            for index in 0..count {
                assert!(verifier.verify(&proof_for(count, index)).unwrap(), "{}/{}", index, count);
            }
        }
    }

    #[test]
    fn test_wrong_root_is_false_not_error() {
        let mut proof = proof_for(6, 4);
        proof.claimed_root = HashEngine::default().digest(b"some other tree");
        assert!(!ProofVerifier::default().verify(&proof).unwrap());
    }

    #[test]
    fn test_flipped_side_is_malformed() {
        let mut proof = proof_for(4, 1);
        proof.path[0].side = Side::Right;
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_truncated_path_is_malformed() {
        let mut proof = proof_for(8, 5);
        proof.path.pop();
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_short_inner_sibling_is_malformed() {
        let mut proof = proof_for(8, 2);
        proof.path[1].digest = ByteString::new(vec![0u8; 5]);
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_algorithm_mismatch_is_malformed() {
        let proof = proof_for(3, 0);
        let verifier = ProofVerifier::new(HashEngine::new(HashAlgorithm::Blake3));
        assert!(matches!(
            verifier.verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_wrong_proof_type_is_malformed() {
        let mut proof = proof_for(2, 0);
        proof.proof_type = "MT-POE".to_string();
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_index_beyond_count_is_malformed() {
        let mut proof = proof_for(2, 1);
        proof.metadata.as_mut().unwrap().leaf_count = 1;
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    fn bare(proof: Proof) -> Proof {
        Proof::from_path(proof.target_leaf, proof.claimed_root, proof.path)
    }

    #[test]
    fn test_bare_proof_verifies_without_metadata() {
        let verifier = ProofVerifier::default();
        for index in 0..5 {
            assert!(verifier.verify(&bare(proof_for(5, index))).unwrap());
        }
    }

    #[test]
    fn test_bare_proof_with_wrong_side_is_false() {
        let mut proof = bare(proof_for(4, 2));
        proof.path[0].side = Side::Left;
        assert!(!ProofVerifier::default().verify(&proof).unwrap());
    }

    #[test]
    fn test_bare_proof_still_checks_widths() {
        let mut proof = bare(proof_for(4, 1));
        proof.path[1].digest = ByteString::new(vec![0u8; 3]);
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));

        let mut proof = bare(proof_for(4, 1));
        proof.claimed_root = ByteString::new(vec![0u8; 31]);
        assert!(matches!(
            ProofVerifier::default().verify(&proof),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_verify_all_reports_each_proof() {
        let mut broken = proof_for(4, 0);
        broken.path.clear();
        let mut stale = proof_for(4, 3);
        stale.target_leaf = HashEngine::default().digest(b"replaced");

        let results = ProofVerifier::default().verify_all(&[proof_for(4, 2), stale, broken]);
        assert!(matches!(results[0], Ok(true)));
        assert!(matches!(results[1], Ok(false)));
        assert!(matches!(results[2], Err(MerkleError::MalformedProof { .. })));
    }
}
