//! Known-answer tests against the embedded vector file

use augbls_algorithms::bls12_381::{hash_to_g2, G2Affine};
use augbls_sign::bls::derive::{
    derive_child_sk, derive_child_sk_unhardened, farmer_sk, key_gen_with_mnemonic,
    seed_from_mnemonic,
};
use augbls_sign::{AugSchemeMpl, PrivateKey, PublicKey, Signature};
use augbls_tests::vectors::{self, decode};

fn sk_hex(sk: &PrivateKey) -> String {
    hex::encode(&sk.to_bytes()[..])
}

#[test]
fn keygen_matches_known_answers() {
    let file = vectors::load().unwrap();

    for (i, v) in file.keygen.iter().enumerate() {
        let seed = decode("seed", &v.seed).unwrap();
        let sk = AugSchemeMpl::key_gen(&seed).unwrap();
        assert_eq!(*sk.to_hex(), v.sk, "private key of vector {}", i);

        let pk = sk.public_key();
        assert_eq!(pk.to_hex(), v.pk, "public key of vector {}", i);
        assert_eq!(pk.fingerprint(), v.fingerprint, "fingerprint of vector {}", i);
        assert_eq!(PublicKey::from_hex(&v.pk).unwrap(), pk);
    }
}

#[test]
fn signatures_match_known_answers() {
    let file = vectors::load().unwrap();

    for (i, v) in file.keygen.iter().enumerate() {
        let sk = PrivateKey::from_hex(&v.sk).unwrap();
        let pk = PublicKey::from_hex(&v.pk).unwrap();
        let message = decode("message", &v.message).unwrap();

        let sig = AugSchemeMpl::sign(&sk, &message).unwrap();
        assert_eq!(hex::encode(sig.to_bytes()), v.signature, "signature of vector {}", i);

        let parsed = Signature::from_hex(&v.signature).unwrap();
        assert!(AugSchemeMpl::verify(&pk, &message, &parsed));
        assert!(AugSchemeMpl::verify_bytes(
            &pk,
            &message,
            &decode("signature", &v.signature).unwrap()
        ));
    }
}

#[test]
fn child_keys_match_known_answers() {
    let file = vectors::load().unwrap();

    for (i, v) in file.keygen.iter().enumerate() {
        let root = PrivateKey::from_hex(&v.sk).unwrap();
        assert_eq!(
            sk_hex(&derive_child_sk(&root, 0).unwrap()),
            v.children.hardened_0,
            "hardened child of vector {}",
            i
        );
        assert_eq!(
            sk_hex(&derive_child_sk_unhardened(&root, 0)),
            v.children.unhardened_0,
            "unhardened child of vector {}",
            i
        );
        assert_eq!(
            sk_hex(&farmer_sk(&root).unwrap()),
            v.children.farmer,
            "farmer key of vector {}",
            i
        );
    }
}

#[test]
fn hash_to_g2_matches_rfc_vectors() {
    let file = vectors::load().unwrap();
    let dst = file.hash_to_g2.dst.as_bytes();

    for case in &file.hash_to_g2.cases {
        let msg = decode("msg", &case.msg).unwrap();
        let point = G2Affine::from(hash_to_g2(&msg, dst).unwrap());
        assert_eq!(hex::encode(point.to_compressed()), case.point);
    }
}

#[test]
fn mnemonic_seeds_match_known_answers() {
    let file = vectors::load().unwrap();

    for v in &file.mnemonic {
        let seed = seed_from_mnemonic(&v.phrase, &v.passphrase);
        assert_eq!(hex::encode(&seed[..]), v.seed);

        let sk = key_gen_with_mnemonic(&v.phrase, &v.passphrase).unwrap();
        assert_eq!(*sk.to_hex(), v.sk);
    }
}
