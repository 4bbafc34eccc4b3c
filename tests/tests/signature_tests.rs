//! Scheme-agnostic flows driven through the `augbls-api` traits

use augbls_api::{AggregateSignature, Error, Signature, SignatureDerive, SignatureSerialize};
use augbls_sign::AugSchemeMpl;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn sign_and_verify<S: Signature>(rng: &mut ChaCha20Rng) {
    let keypair = S::keypair(rng).unwrap();
    let pk = S::public_key(&keypair);
    let sk = S::secret_key(&keypair);

    let sig = S::sign(b"generic message", &sk).unwrap();
    assert!(S::verify(b"generic message", &sig, &pk).is_ok());
    assert!(S::verify(b"other message", &sig, &pk).is_err());
}

fn serialization_round_trip<S: SignatureSerialize>(rng: &mut ChaCha20Rng)
where
    S::PublicKey: PartialEq + core::fmt::Debug,
    S::SignatureData: PartialEq + core::fmt::Debug,
{
    let keypair = S::keypair(rng).unwrap();
    let pk = S::public_key(&keypair);
    let sk = S::secret_key(&keypair);
    let sig = S::sign(b"bytes", &sk).unwrap();

    let pk_bytes = S::serialize_public_key(&pk);
    let sk_bytes = S::serialize_secret_key(&sk);
    let sig_bytes = S::serialize_signature(&sig);
    assert_eq!(pk_bytes.len(), S::PUBLIC_KEY_SIZE);
    assert_eq!(sk_bytes.len(), S::SECRET_KEY_SIZE);
    assert_eq!(sig_bytes.len(), S::SIGNATURE_SIZE);

    assert_eq!(S::deserialize_public_key(&pk_bytes).unwrap(), pk);
    assert_eq!(S::deserialize_signature(&sig_bytes).unwrap(), sig);

    let restored = S::deserialize_secret_key(&sk_bytes).unwrap();
    let again = S::sign(b"bytes", &restored).unwrap();
    assert_eq!(again, sig);
}

fn aggregate_flow<S: AggregateSignature>(rng: &mut ChaCha20Rng) {
    let messages: [&[u8]; 3] = [b"alpha", b"beta", b"gamma"];
    let mut public_keys = Vec::new();
    let mut signatures = Vec::new();
    for message in messages {
        let keypair = S::keypair(rng).unwrap();
        signatures.push(S::sign(message, &S::secret_key(&keypair)).unwrap());
        public_keys.push(S::public_key(&keypair));
    }

    let agg = S::aggregate(&signatures).unwrap();
    assert!(S::aggregate_verify(&public_keys, &messages, &agg).is_ok());

    let reordered: [&[u8]; 3] = [b"beta", b"alpha", b"gamma"];
    assert!(S::aggregate_verify(&public_keys, &reordered, &agg).is_err());
    assert!(S::aggregate(&[]).is_err());
}

#[test]
fn bls_through_signature_trait() {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    sign_and_verify::<AugSchemeMpl>(&mut rng);
}

#[test]
fn bls_through_serialize_trait() {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    serialization_round_trip::<AugSchemeMpl>(&mut rng);
}

#[test]
fn bls_through_aggregate_trait() {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    aggregate_flow::<AugSchemeMpl>(&mut rng);
}

#[test]
fn derive_keypair_is_deterministic() {
    let seed = [7u8; 32];
    let (pk1, sk1) = AugSchemeMpl::derive_keypair(&seed).unwrap();
    let (pk2, sk2) = AugSchemeMpl::derive_keypair(&seed).unwrap();
    assert_eq!(pk1, pk2);
    assert_eq!(sk1, sk2);
    assert_eq!(AugSchemeMpl::derive_public_key(&sk1).unwrap(), pk1);

    let short = [7u8; 31];
    assert!(short.len() < AugSchemeMpl::MIN_SEED_SIZE);
    assert!(matches!(
        AugSchemeMpl::derive_keypair(&short),
        Err(Error::InvalidSeed { .. })
    ));
}

#[test]
fn trait_errors_carry_useful_kinds() {
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
    let keypair = AugSchemeMpl::keypair(&mut rng).unwrap();
    let sig = <AugSchemeMpl as Signature>::sign(b"m", &keypair.1).unwrap();

    assert!(matches!(
        <AugSchemeMpl as Signature>::verify(b"x", &sig, &keypair.0),
        Err(Error::InvalidSignature { .. })
    ));
    assert!(AugSchemeMpl::deserialize_public_key(&[0u8; 47]).is_err());
    assert!(AugSchemeMpl::deserialize_signature(&[0u8; 96]).is_err());
}

#[test]
fn facade_prelude_exposes_the_scheme() {
    use augbls::prelude::*;

    let sk = AugSchemeMpl::key_gen(&[0u8; 32]).unwrap();
    let sig: BlsSignature = AugSchemeMpl::sign(&sk, b"facade").unwrap();
    let pk: PublicKey = sk.public_key();
    assert!(AugSchemeMpl::verify(&pk, b"facade", &sig));
}

#[test]
fn facade_reexports_workspace_dependencies() {
    use augbls::rand::RngCore;
    use augbls::subtle::ConstantTimeEq;
    use augbls::zeroize::Zeroizing;

    let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
    let mut seed = Zeroizing::new([0u8; 32]);
    rng.fill_bytes(&mut seed[..]);

    let sk = AugSchemeMpl::key_gen(&seed[..]).unwrap();
    let again = augbls::sign::PrivateKey::from_bytes(&sk.to_bytes()[..]).unwrap();
    assert!(bool::from(sk.ct_eq(&again)));
}
