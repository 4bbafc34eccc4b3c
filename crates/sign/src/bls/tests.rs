//! Protocol-level tests for the augmented scheme

use super::derive::{derive_child_sk, derive_child_sk_unhardened};
use super::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/* ------------------------------------------------------------------------- */
/*                                  Helpers                                  */
/* ------------------------------------------------------------------------- */

fn key_from_rng(rng: &mut ChaCha20Rng) -> PrivateKey {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    AugSchemeMpl::key_gen(&seed).unwrap()
}

/* ------------------------------------------------------------------------- */
/*                               Sign / verify                               */
/* ------------------------------------------------------------------------- */

#[test]
fn test_zero_seed_golden_vector() {
    let sk = AugSchemeMpl::key_gen(&[0u8; 32]).unwrap();
    let pk = sk.public_key();
    assert_eq!(pk.fingerprint(), 3_020_805_514);

    let sig = AugSchemeMpl::sign(&sk, b"test").unwrap();
    assert!(AugSchemeMpl::verify(&pk, b"test", &sig));

    let other = AugSchemeMpl::key_gen(&[1u8; 32]).unwrap();
    assert!(!AugSchemeMpl::verify(&other.public_key(), b"test", &sig));
}

#[test]
fn test_message_tampering_is_detected() {
    let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
    let sk = key_from_rng(&mut rng);
    let pk = sk.public_key();
    let message = b"attack at dawn".to_vec();
    let sig = AugSchemeMpl::sign(&sk, &message).unwrap();

    for bit in [0usize, 7, 33, 8 * message.len() - 1] {
        let mut tampered = message.clone();
        tampered[bit / 8] ^= 1 << (bit % 8);
        assert!(!AugSchemeMpl::verify(&pk, &tampered, &sig));
    }
    assert!(!AugSchemeMpl::verify(&pk, b"", &sig));
}

#[test]
fn test_signature_tampering_is_detected() {
    let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
    let sk = key_from_rng(&mut rng);
    let pk = sk.public_key();
    let bytes = AugSchemeMpl::sign(&sk, b"payload").unwrap().to_bytes();

    // The three flag bits, then bits inside x.c1 and x.c0
    for bit in [5usize, 6, 7, 9, 8 * 47 + 3, 8 * 95] {
        let mut tampered = bytes;
        tampered[bit / 8] ^= 1 << (bit % 8);
        assert!(!AugSchemeMpl::verify_bytes(&pk, b"payload", &tampered));
    }
}

#[test]
fn test_signatures_are_deterministic() {
    let sk = AugSchemeMpl::key_gen(&[9u8; 32]).unwrap();
    assert_eq!(
        AugSchemeMpl::sign(&sk, b"same").unwrap(),
        AugSchemeMpl::sign(&sk, b"same").unwrap()
    );
    assert_ne!(
        AugSchemeMpl::sign(&sk, b"same").unwrap(),
        AugSchemeMpl::sign(&sk, b"different").unwrap()
    );
}

/* ------------------------------------------------------------------------- */
/*                                Aggregation                                */
/* ------------------------------------------------------------------------- */

#[test]
fn test_aggregate_verify_distinct_messages() {
    let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
    let keys: Vec<PrivateKey> = (0..3).map(|_| key_from_rng(&mut rng)).collect();
    let pks: Vec<PublicKey> = keys.iter().map(PrivateKey::public_key).collect();
    let messages: [&[u8]; 3] = [b"one", b"two", b"three"];

    let sigs: Vec<[u8; 96]> = keys
        .iter()
        .zip(messages)
        .map(|(sk, m)| AugSchemeMpl::sign(sk, m).unwrap().to_bytes())
        .collect();
    let agg = AugSchemeMpl::aggregate(&sigs).unwrap();

    assert!(AugSchemeMpl::aggregate_verify(&pks, &messages, &agg));
    assert!(AugSchemeMpl::aggregate_verify_bytes(&pks, &messages, &agg.to_bytes()));

    let swapped: [&[u8]; 3] = [b"two", b"one", b"three"];
    assert!(!AugSchemeMpl::aggregate_verify(&pks, &swapped, &agg));
    assert!(!AugSchemeMpl::aggregate_verify(&pks[..2], &messages[..2], &agg));
}

#[test]
fn test_aggregate_same_message_is_safe() {
    // Prepending the signer's key keeps identical messages distinct
    let mut rng = ChaCha20Rng::from_seed([14u8; 32]);
    let a = key_from_rng(&mut rng);
    let b = key_from_rng(&mut rng);
    let sigs = [
        AugSchemeMpl::sign(&a, b"vote").unwrap(),
        AugSchemeMpl::sign(&b, b"vote").unwrap(),
    ];
    let agg = AugSchemeMpl::aggregate_signatures(&sigs).unwrap();
    assert!(AugSchemeMpl::aggregate_verify(
        &[a.public_key(), b.public_key()],
        &[b"vote", b"vote"],
        &agg
    ));
}

#[test]
fn test_aggregate_is_order_independent() {
    let mut rng = ChaCha20Rng::from_seed([15u8; 32]);
    let sigs: Vec<Signature> = (0..4u8)
        .map(|i| AugSchemeMpl::sign(&key_from_rng(&mut rng), &[i]).unwrap())
        .collect();
    let mut reversed = sigs.clone();
    reversed.reverse();

    assert_eq!(
        AugSchemeMpl::aggregate_signatures(&sigs).unwrap(),
        AugSchemeMpl::aggregate_signatures(&reversed).unwrap()
    );
    assert_eq!(AugSchemeMpl::aggregate_signatures(&sigs[..1]).unwrap(), sigs[0]);
}

#[test]
fn test_sign_with_prepend_pk_for_aggregate_key() {
    let mut rng = ChaCha20Rng::from_seed([16u8; 32]);
    let a = key_from_rng(&mut rng);
    let b = key_from_rng(&mut rng);
    let joint = AugSchemeMpl::aggregate_public_keys(&[a.public_key(), b.public_key()]).unwrap();

    let partial_a = AugSchemeMpl::sign_with_prepend_pk(&a, &joint, b"joint spend").unwrap();
    let partial_b = AugSchemeMpl::sign_with_prepend_pk(&b, &joint, b"joint spend").unwrap();
    let combined = AugSchemeMpl::aggregate_signatures(&[partial_a, partial_b]).unwrap();

    assert!(AugSchemeMpl::verify(&joint, b"joint spend", &combined));
    assert!(!AugSchemeMpl::verify(&joint, b"joint spend", &partial_a));
    assert!(!AugSchemeMpl::verify(&a.public_key(), b"joint spend", &partial_a));
}

/* ------------------------------------------------------------------------- */
/*                             Derived key usage                             */
/* ------------------------------------------------------------------------- */

#[test]
fn test_derived_keys_sign() {
    let root = AugSchemeMpl::key_gen(&[0u8; 32]).unwrap();
    for child in [
        derive_child_sk(&root, 42).unwrap(),
        derive_child_sk_unhardened(&root, 42),
    ] {
        let sig = AugSchemeMpl::sign(&child, b"child").unwrap();
        assert!(AugSchemeMpl::verify(&child.public_key(), b"child", &sig));
        assert!(!AugSchemeMpl::verify(&root.public_key(), b"child", &sig));
    }
}

/* ------------------------------------------------------------------------- */
/*                                   serde                                   */
/* ------------------------------------------------------------------------- */

#[cfg(feature = "serde")]
#[test]
fn test_serde_hex_strings() {
    let sk = AugSchemeMpl::key_gen(&[0u8; 32]).unwrap();
    let pk = sk.public_key();
    let sig = AugSchemeMpl::sign(&sk, b"serde").unwrap();

    let json = serde_json::to_string(&pk).unwrap();
    assert_eq!(json, format!("\"{}\"", pk.to_hex()));
    assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), pk);

    let json = serde_json::to_string(&sig).unwrap();
    assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), sig);

    let json = serde_json::to_string(&sk).unwrap();
    assert!(json.starts_with("\"0x4a353be3"));
    assert_eq!(serde_json::from_str::<PrivateKey>(&json).unwrap(), sk);

    assert!(serde_json::from_str::<PublicKey>("\"0x00\"").is_err());
}
