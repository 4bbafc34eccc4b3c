//! The augmented (message-prepended) BLS scheme
//!
//! Every message is hashed to G2 as `pk || message` under
//! [`AUG_SCHEME_DST`], so distinct signers never sign the same point and
//! aggregate verification needs no proof of possession.
//!
//! Verification is a single pairing product check:
//! `e(pk, H(pk || m)) * e(-G1, sig) == 1`.

use augbls_algorithms::bls12_381::{
    hash_to_g2, G1Affine, G2Affine, G2Projective, PairingBatch, Scalar,
};
use augbls_api::{
    AggregateSignature, Error as ApiError, Result as ApiResult, ResultExt,
    Signature as SignatureTrait, SignatureDerive, SignatureSerialize,
};
use augbls_params::traditional::bls::{
    AUG_SCHEME_DST, BLS_PRIVATE_KEY_SIZE, BLS_PUBLIC_KEY_SIZE, BLS_SIGNATURE_SIZE, KEYGEN_INFO,
    KEYGEN_MIN_SEED_SIZE, KEYGEN_OKM_SIZE, KEYGEN_SALT,
};
use hkdf::Hkdf;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use super::{PrivateKey, PublicKey, Signature};
use crate::error::{Error, Result};

/// Augmented BLS over BLS12-381 with signatures in G2
pub struct AugSchemeMpl;

/// `H(pk || message)` on G2
fn hash_augmented(public_key: &PublicKey, message: &[u8]) -> Result<G2Affine> {
    let mut input = Vec::with_capacity(BLS_PUBLIC_KEY_SIZE + message.len());
    input.extend_from_slice(&public_key.to_bytes());
    input.extend_from_slice(message);
    Ok(G2Affine::from(hash_to_g2(&input, AUG_SCHEME_DST)?))
}

impl AugSchemeMpl {
    /// Derive a private key from at least 32 bytes of seed material.
    ///
    /// HKDF-SHA256 over `seed || 0x00` with the KeyGen salt, expanded to
    /// 48 bytes and reduced modulo `r`.
    pub fn key_gen(seed: &[u8]) -> Result<PrivateKey> {
        if seed.len() < KEYGEN_MIN_SEED_SIZE {
            return Err(Error::InvalidSeed {
                min: KEYGEN_MIN_SEED_SIZE,
                actual: seed.len(),
            });
        }

        let mut ikm = Zeroizing::new(Vec::with_capacity(seed.len() + 1));
        ikm.extend_from_slice(seed);
        ikm.push(0);

        let hk = Hkdf::<Sha256>::new(Some(KEYGEN_SALT), &ikm);
        let mut okm = Zeroizing::new([0u8; KEYGEN_OKM_SIZE]);
        // 48 bytes is far below the HKDF-SHA256 output limit
        hk.expand(&KEYGEN_INFO, &mut okm[..])
            .map_err(|_| Error::InvalidLength {
                context: "KeyGen output",
                expected: KEYGEN_OKM_SIZE,
                actual: okm.len(),
            })?;

        Ok(PrivateKey::from_scalar(Scalar::from_be_bytes_mod_order(&okm[..])))
    }

    /// Sign `pk || message` where `pk` is the signer's own public key
    pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Result<Signature> {
        Self::sign_with_prepend_pk(private_key, &private_key.public_key(), message)
    }

    /// Sign `prepend_pk || message` with a caller-chosen public key.
    ///
    /// Used when signing on behalf of an aggregate key: the partial
    /// signatures of its members sum to one that verifies under it.
    pub fn sign_with_prepend_pk(
        private_key: &PrivateKey,
        prepend_pk: &PublicKey,
        message: &[u8],
    ) -> Result<Signature> {
        let point = hash_augmented(prepend_pk, message)?;
        Ok(Signature::from_point(G2Affine::from(
            point * private_key.scalar(),
        )))
    }

    /// Check a signature. Malformed input is treated as invalid.
    pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        Self::aggregate_verify(&[*public_key], &[message], signature)
    }

    /// Decode and check a compressed signature
    pub fn verify_bytes(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_bytes(signature) {
            Ok(sig) => Self::verify(public_key, message, &sig),
            Err(err) => {
                debug!(error = %err, "rejecting undecodable signature");
                false
            }
        }
    }

    /// Sum compressed signatures.
    ///
    /// Fails on an empty list or on the first input that does not decode.
    pub fn aggregate<S: AsRef<[u8]>>(signatures: &[S]) -> Result<Signature> {
        let decoded = signatures
            .iter()
            .map(|s| Signature::from_bytes(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::aggregate_signatures(&decoded)
    }

    /// Sum already decoded signatures
    pub fn aggregate_signatures(signatures: &[Signature]) -> Result<Signature> {
        if signatures.is_empty() {
            return Err(Error::EmptyInput("aggregate"));
        }
        debug!(count = signatures.len(), "aggregating signatures");
        let sum: G2Projective = signatures.iter().map(|s| G2Projective::from(s.point())).sum();
        Ok(Signature::from_point(G2Affine::from(sum)))
    }

    /// Sum public keys. Fails on an empty list.
    pub fn aggregate_public_keys(public_keys: &[PublicKey]) -> Result<PublicKey> {
        let (first, rest) = public_keys
            .split_first()
            .ok_or(Error::EmptyInput("aggregate_public_keys"))?;
        Ok(rest.iter().fold(*first, |acc, pk| acc + *pk))
    }

    /// Check an aggregate signature over one message per public key.
    ///
    /// Unequal or empty inputs and identity keys make the check fail.
    /// Callers are responsible for the `(pk, message)` pairs being
    /// distinct.
    pub fn aggregate_verify<M: AsRef<[u8]>>(
        public_keys: &[PublicKey],
        messages: &[M],
        signature: &Signature,
    ) -> bool {
        match Self::try_aggregate_verify(public_keys, messages, signature) {
            Ok(valid) => valid,
            Err(err) => {
                debug!(error = %err, "aggregate verification rejected its input");
                false
            }
        }
    }

    /// [`aggregate_verify`](Self::aggregate_verify) on a compressed
    /// signature
    pub fn aggregate_verify_bytes<M: AsRef<[u8]>>(
        public_keys: &[PublicKey],
        messages: &[M],
        signature: &[u8],
    ) -> bool {
        match Signature::from_bytes(signature) {
            Ok(sig) => Self::aggregate_verify(public_keys, messages, &sig),
            Err(err) => {
                debug!(error = %err, "rejecting undecodable aggregate signature");
                false
            }
        }
    }

    fn try_aggregate_verify<M: AsRef<[u8]>>(
        public_keys: &[PublicKey],
        messages: &[M],
        signature: &Signature,
    ) -> Result<bool> {
        if public_keys.len() != messages.len() {
            return Err(Error::LengthMismatch {
                context: "aggregate_verify",
                public_keys: public_keys.len(),
                messages: messages.len(),
            });
        }
        if public_keys.is_empty() {
            return Err(Error::EmptyInput("aggregate_verify"));
        }
        if public_keys.iter().any(PublicKey::is_identity) {
            return Err(Error::InvalidPublicKey("identity public key"));
        }

        let mut batch = PairingBatch::new();
        batch.add_pair(&-G1Affine::generator(), signature.point());
        for (pk, message) in public_keys.iter().zip(messages) {
            let point = hash_augmented(pk, message.as_ref())?;
            batch.add_pair(pk.point(), &point);
        }

        let valid = batch.check();
        if !valid {
            debug!(pairs = batch.len(), "pairing check failed");
        }
        Ok(valid)
    }
}

impl SignatureTrait for AugSchemeMpl {
    type PublicKey = PublicKey;
    type SecretKey = PrivateKey;
    type SignatureData = Signature;
    type KeyPair = (PublicKey, PrivateKey);

    fn name() -> &'static str {
        "BLS12-381-AugSchemeMPL"
    }

    /// Run KeyGen on 32 fresh bytes from `rng`
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let mut seed = Zeroizing::new([0u8; KEYGEN_MIN_SEED_SIZE]);
        rng.fill_bytes(&mut seed[..]);
        Self::derive_keypair(&seed[..])
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        Ok(Self::sign(secret_key, message)?)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        if AugSchemeMpl::verify(public_key, message, signature) {
            Ok(())
        } else {
            Err(Error::Verification.into())
        }
    }
}

impl SignatureSerialize for AugSchemeMpl {
    const PUBLIC_KEY_SIZE: usize = BLS_PUBLIC_KEY_SIZE;
    const SECRET_KEY_SIZE: usize = BLS_PRIVATE_KEY_SIZE;
    const SIGNATURE_SIZE: usize = BLS_SIGNATURE_SIZE;

    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8> {
        key.to_bytes().to_vec()
    }

    fn deserialize_public_key(bytes: &[u8]) -> ApiResult<Self::PublicKey> {
        PublicKey::from_bytes(bytes).with_context("deserialize_public_key")
    }

    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(key.to_bytes().to_vec())
    }

    fn deserialize_secret_key(bytes: &[u8]) -> ApiResult<Self::SecretKey> {
        PrivateKey::from_bytes(bytes).with_context("deserialize_secret_key")
    }

    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8> {
        sig.to_bytes().to_vec()
    }

    fn deserialize_signature(bytes: &[u8]) -> ApiResult<Self::SignatureData> {
        Signature::from_bytes(bytes).with_context("deserialize_signature")
    }
}

impl SignatureDerive for AugSchemeMpl {
    const MIN_SEED_SIZE: usize = KEYGEN_MIN_SEED_SIZE;

    fn derive_keypair(seed: &[u8]) -> ApiResult<Self::KeyPair> {
        let sk = Self::key_gen(seed)?;
        Ok((sk.public_key(), sk))
    }

    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        Ok(secret_key.public_key())
    }
}

impl AggregateSignature for AugSchemeMpl {
    fn aggregate(signatures: &[Self::SignatureData]) -> ApiResult<Self::SignatureData> {
        Ok(Self::aggregate_signatures(signatures)?)
    }

    fn aggregate_verify(
        public_keys: &[Self::PublicKey],
        messages: &[&[u8]],
        signature: &Self::SignatureData,
    ) -> ApiResult<()> {
        if AugSchemeMpl::aggregate_verify(public_keys, messages, signature) {
            Ok(())
        } else {
            Err(Error::Verification.into())
        }
    }
}
