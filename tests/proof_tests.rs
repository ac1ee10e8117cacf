//! Proof generation and verification tests

use mtree::{
    proofs::{expected_path_len, ProofGenerator, INCLUSION_PROOF_TYPE, PROOF_FORMAT_VERSION},
    ByteString, HashAlgorithm, HashEngine, MerkleError, MerkleTree, Proof, ProofVerifier, Side,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn word_tree() -> MerkleTree {
    let mut tree = MerkleTree::default();
    tree.add_leaves(["tierion", "bitcoin", "blockchain"]);
    tree
}

fn flip_first_byte(bytes: &ByteString) -> ByteString {
    let mut raw = bytes.clone().into_vec();
    raw[0] ^= 0x01;
    ByteString::new(raw)
}

#[test]
fn test_proof_fields() {
    let mut tree = word_tree();
    let root = tree.root().unwrap();
    let proof = tree.inclusion_proof(2).unwrap();

    assert_eq!(proof.version, PROOF_FORMAT_VERSION);
    assert_eq!(proof.proof_type, INCLUSION_PROOF_TYPE);
    assert_eq!(proof.claimed_root, root);
    assert_eq!(&proof.target_leaf, tree.get_leaf(2).unwrap());
    assert_eq!(proof.leaf_index(), Some(2));
    assert_eq!(proof.leaf_count(), Some(3));
    assert_eq!(proof.algorithm(), Some(HashAlgorithm::Sha256));

    // Unpaired last leaf pairs with itself, then sits right of H(l0 ‖ l1)
    assert_eq!(proof.path.len(), 2);
    assert_eq!(proof.path[0].side, Side::Right);
    assert_eq!(&proof.path[0].digest, tree.get_leaf(2).unwrap());
    assert_eq!(proof.path[1].side, Side::Left);
    assert_eq!(
        proof.path[1].digest,
        HashEngine::default().digest_pair(
            tree.get_leaf(0).unwrap().as_bytes(),
            tree.get_leaf(1).unwrap().as_bytes()
        )
    );
}

#[test]
fn test_first_leaf_of_two_hex_leaves() {
    let mut tree = MerkleTree::with_algorithm(false, HashAlgorithm::Sha256);
    let left = ByteString::from_hex("a292780cc748697cb499fdcc8cb89d835609f11e502281dfe3f6690b1cc23dcb").unwrap();
    let right = ByteString::from_hex("cb4990b9a8936bbc137ddeb6dcab4620897b099a450ecdc5f3e86ef4b3a7135c").unwrap();
    tree.add_leaves([&left, &right]);

    let proof = tree.inclusion_proof(0).unwrap();
    assert_eq!(proof.path.len(), 1);
    assert_eq!(proof.path[0].side, Side::Right);
    assert_eq!(proof.path[0].digest, right);

    let proof = tree.inclusion_proof(1).unwrap();
    assert_eq!(proof.path[0].side, Side::Left);
    assert_eq!(proof.path[0].digest, left);
}

#[test]
fn test_every_index_verifies() {
    for count in 1..=20usize {
        let mut tree = MerkleTree::default();
        tree.add_leaves((0..count as u16).map(u16::to_le_bytes));
        for index in 0..count {
            let proof = tree.inclusion_proof(index).unwrap();
            assert_eq!(proof.path.len(), expected_path_len(count as u64));
            assert!(tree.verify_inclusion_proof(&proof).unwrap(), "{}/{}", index, count);
        }
    }
}

#[test]
fn test_generator_works_on_borrowed_tree() {
    let mut tree = word_tree();
    let built = tree.build_tree().unwrap();
    let proof = ProofGenerator::new(built).prove_inclusion(1).unwrap();
    assert!(ProofVerifier::default().verify(&proof).unwrap());
}

#[rstest]
#[case::target_leaf(0)]
#[case::claimed_root(1)]
#[case::first_sibling(2)]
#[case::last_sibling(3)]
fn test_tampering_returns_false(#[case] field: usize) {
    let mut tree = MerkleTree::default();
    tree.add_leaves(["a", "b", "c", "d", "e", "f"]);
    let mut proof = tree.inclusion_proof(3).unwrap();

    match field {
        0 => proof.target_leaf = flip_first_byte(&proof.target_leaf),
        1 => proof.claimed_root = flip_first_byte(&proof.claimed_root),
        2 => proof.path[0].digest = flip_first_byte(&proof.path[0].digest),
        _ => {
            let last = proof.path.len() - 1;
            proof.path[last].digest = flip_first_byte(&proof.path[last].digest);
        }
    }

    assert!(!tree.verify_inclusion_proof(&proof).unwrap());
}

#[test]
fn test_proof_against_stale_root_fails() {
    let mut tree = word_tree();
    let proof = tree.inclusion_proof(0).unwrap();

    tree.add_leaf("ledger");
    let mut rebased = proof.clone();
    rebased.claimed_root = tree.root().unwrap();
    rebased.metadata.as_mut().unwrap().leaf_count = 4;

    assert!(tree.verify_inclusion_proof(&proof).unwrap());
    assert!(!tree.verify_inclusion_proof(&rebased).unwrap());
}

#[test]
fn test_structural_damage_is_malformed() {
    let mut tree = word_tree();
    let proof = tree.inclusion_proof(1).unwrap();

    let mut extra = proof.clone();
    extra.path.push(extra.path[0].clone());

    let mut wrong_version = proof.clone();
    wrong_version.version = "2.0".to_string();

    let mut empty_tree = proof.clone();
    empty_tree.metadata.as_mut().unwrap().leaf_count = 0;

    let mut short_root = proof.clone();
    short_root.claimed_root = ByteString::new(vec![0; 4]);

    for broken in [extra, wrong_version, empty_tree, short_root] {
        assert!(matches!(
            tree.verify_inclusion_proof(&broken),
            Err(MerkleError::MalformedProof { .. })
        ));
    }
}

#[test]
fn test_json_round_trip_verifies_identically() {
    let mut tree = word_tree();
    let proof = tree.inclusion_proof(1).unwrap();

    let decoded = Proof::from_json(&proof.to_json().unwrap()).unwrap();
    assert_eq!(decoded, proof);
    assert!(tree.verify_inclusion_proof(&decoded).unwrap());

    let compact = Proof::from_json(&proof.to_json_compact().unwrap()).unwrap();
    assert_eq!(compact, proof);
}

#[test]
fn test_binary_round_trip_verifies_identically() {
    let mut tree = MerkleTree::with_algorithm(true, HashAlgorithm::Blake3);
    tree.add_leaves(["tierion", "bitcoin", "blockchain"]);
    let proof = tree.inclusion_proof(0).unwrap();

    let decoded = Proof::from_bytes(&proof.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, proof);
    assert!(tree.verify_inclusion_proof(&decoded).unwrap());
}

#[test]
fn test_json_missing_field_is_malformed() {
    let mut tree = word_tree();
    let json = tree.inclusion_proof(0).unwrap().to_json_compact().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value.as_object_mut().unwrap().remove("claimed_root");

    assert!(matches!(
        Proof::from_json(&value.to_string()),
        Err(MerkleError::MalformedProof { .. })
    ));
}

#[test]
fn test_json_unknown_algorithm_is_malformed() {
    let mut tree = word_tree();
    let json = tree.inclusion_proof(0).unwrap().to_json().unwrap();
    let json = json.replace("\"sha256\"", "\"whirlpool\"");

    assert!(matches!(
        Proof::from_json(&json),
        Err(MerkleError::MalformedProof { .. })
    ));
}

#[test]
fn test_verify_all_matches_sequential() {
    let mut tree = MerkleTree::default();
    tree.add_leaves((0..64u8).map(|i| [i]));
    let mut proofs: Vec<Proof> = (0..64).map(|i| tree.inclusion_proof(i).unwrap()).collect();
    proofs[10].target_leaf = flip_first_byte(&proofs[10].target_leaf);

    let verifier = ProofVerifier::new(HashEngine::new(HashAlgorithm::Sha256));
    let results = verifier.verify_all(&proofs);

    assert_eq!(results.len(), 64);
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), i != 10, "proof {}", i);
    }
}

#[test]
fn test_path_leaf_and_root_alone_verify() {
    let mut tree = MerkleTree::default();
    tree.add_leaves(["alpha", "beta", "gamma", "delta"]);
    let full: serde_json::Value =
        serde_json::from_str(&tree.inclusion_proof(2).unwrap().to_json().unwrap()).unwrap();

    let minimal = serde_json::json!({
        "path": full["path"],
        "target_leaf": full["target_leaf"],
        "claimed_root": full["claimed_root"],
    });
    let proof = Proof::from_json(&minimal.to_string()).unwrap();
    assert_eq!(proof.metadata, None);
    assert!(tree.verify_inclusion_proof(&proof).unwrap());

    let mut tampered = proof.clone();
    tampered.target_leaf = flip_first_byte(&tampered.target_leaf);
    assert!(!tree.verify_inclusion_proof(&tampered).unwrap());
}

#[test]
fn test_recorded_index_must_match_sides() {
    let mut tree = MerkleTree::default();
    tree.add_leaves(["alpha", "beta", "gamma", "delta"]);
    let mut proof = tree.inclusion_proof(2).unwrap();
    proof.metadata.as_mut().unwrap().leaf_index = 3;

    assert!(matches!(
        tree.verify_inclusion_proof(&proof),
        Err(MerkleError::MalformedProof { .. })
    ));

    proof.metadata = None;
    assert!(tree.verify_inclusion_proof(&proof).unwrap());
}
