//! Property-based tests for augmented BLS signing and key derivation

use augbls_sign::bls::derive::{
    derive_child_pk_unhardened, derive_child_sk_unhardened, synthetic_pk, synthetic_sk,
};
use augbls_sign::{AugSchemeMpl, PrivateKey, PublicKey, Signature};
use proptest::prelude::*;

// Pairings are slow; keep the case count modest
fn config() -> ProptestConfig {
    ProptestConfig::with_cases(8)
}

fn key_from(seed: [u8; 32]) -> PrivateKey {
    AugSchemeMpl::key_gen(&seed).unwrap()
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn sign_then_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..=128)
    ) {
        let sk = key_from(seed);
        let sig = AugSchemeMpl::sign(&sk, &message).unwrap();
        prop_assert!(AugSchemeMpl::verify(&sk.public_key(), &message, &sig));
    }

    #[test]
    fn flipped_message_bit_fails(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 1..=64),
        bit in any::<prop::sample::Index>()
    ) {
        let sk = key_from(seed);
        let sig = AugSchemeMpl::sign(&sk, &message).unwrap();

        let bit = bit.index(message.len() * 8);
        let mut tampered = message.clone();
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!AugSchemeMpl::verify(&sk.public_key(), &tampered, &sig));
    }

    #[test]
    fn encodings_round_trip(seed in any::<[u8; 32]>(), message in any::<[u8; 16]>()) {
        let sk = key_from(seed);
        let pk = sk.public_key();
        let sig = AugSchemeMpl::sign(&sk, &message).unwrap();

        prop_assert_eq!(PrivateKey::from_bytes(&sk.to_bytes()[..]).unwrap(), sk.clone());
        prop_assert_eq!(PublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
        prop_assert_eq!(Signature::from_bytes(&sig.to_bytes()).unwrap(), sig);
    }

    #[test]
    fn unhardened_public_derivation_commutes(seed in any::<[u8; 32]>(), index in any::<u32>()) {
        let parent = key_from(seed);
        let child = derive_child_sk_unhardened(&parent, index);
        prop_assert_eq!(
            derive_child_pk_unhardened(&parent.public_key(), index),
            child.public_key()
        );
    }

    #[test]
    fn synthetic_public_derivation_commutes(
        seed in any::<[u8; 32]>(),
        hidden in any::<[u8; 32]>()
    ) {
        let sk = key_from(seed);
        prop_assert_eq!(
            synthetic_pk(&sk.public_key(), &hidden),
            synthetic_sk(&sk, &hidden).public_key()
        );
    }
}
