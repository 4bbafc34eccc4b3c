//! Hierarchical deterministic key derivation
//!
//! Hardened derivation turns the parent key into a Lamport public key
//! and feeds its hash to KeyGen, so a child cannot be computed from the
//! parent public key. Unhardened derivation adds a public offset
//! `H(parent_pk || index)` and therefore has a public-key-only
//! counterpart.
//!
//! The well-known paths `m/12381/8444/{0,1,2,3}/i` select the farmer,
//! pool, wallet and local keys.

use augbls_algorithms::bls12_381::{G1Affine, G1Projective, Scalar};
use augbls_internal::constant_time::ct_not;
use augbls_internal::endian::u32_to_be_bytes;
use augbls_params::traditional::bls::{
    DEFAULT_HIDDEN_PUZZLE_HASH, FARMER_PATH_INDEX, LAMPORT_CHUNKS,
    LAMPORT_CHUNK_SIZE, LOCAL_PATH_INDEX, MNEMONIC_PBKDF2_ROUNDS, MNEMONIC_SALT_PREFIX,
    MNEMONIC_SEED_SIZE, PATH_COIN_TYPE, PATH_PURPOSE, POOL_PATH_INDEX, WALLET_PATH_INDEX,
};
use augbls_params::utils::hash::SHA256_OUTPUT_SIZE;
use hkdf::Hkdf;
use hmac::Hmac;
use sha2::{Digest, Sha256, Sha512};
use tracing::trace;
use zeroize::Zeroizing;

use super::{AugSchemeMpl, PrivateKey, PublicKey};
use crate::error::{Error, Result};

// ============================================================================
// Hardened derivation
// ============================================================================

/// HKDF-SHA256 with `salt`, expanded to 255 chunks of 32 bytes
fn ikm_to_lamport_sk(ikm: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = Zeroizing::new(vec![0u8; LAMPORT_CHUNKS * LAMPORT_CHUNK_SIZE]);
    hk.expand(&[], &mut okm[..])
        .map_err(|_| Error::InvalidLength {
            context: "Lamport secret key",
            expected: LAMPORT_CHUNKS * LAMPORT_CHUNK_SIZE,
            actual: okm.len(),
        })?;
    Ok(okm)
}

/// Compressed Lamport public key of the parent: the hash of every
/// chunk's hash, for both the key bytes and their complement.
fn parent_sk_to_lamport_pk(
    parent: &PrivateKey,
    index: u32,
) -> Result<Zeroizing<[u8; SHA256_OUTPUT_SIZE]>> {
    let salt = u32_to_be_bytes(index);
    let ikm = parent.to_bytes();
    let not_ikm = Zeroizing::new(ct_not(&*ikm));

    let lamport0 = ikm_to_lamport_sk(&ikm[..], &salt)?;
    let lamport1 = ikm_to_lamport_sk(&not_ikm[..], &salt)?;

    let mut outer = Sha256::new();
    for chunk in lamport0
        .chunks_exact(LAMPORT_CHUNK_SIZE)
        .chain(lamport1.chunks_exact(LAMPORT_CHUNK_SIZE))
    {
        outer.update(Sha256::digest(chunk));
    }

    let mut compressed = Zeroizing::new([0u8; SHA256_OUTPUT_SIZE]);
    compressed.copy_from_slice(&outer.finalize());
    Ok(compressed)
}

/// Hardened child at `index`
pub fn derive_child_sk(parent: &PrivateKey, index: u32) -> Result<PrivateKey> {
    let seed = parent_sk_to_lamport_pk(parent, index)?;
    AugSchemeMpl::key_gen(&seed[..])
}

/// Fold [`derive_child_sk`] over `path`
pub fn derive_path(root: &PrivateKey, path: &[u32]) -> Result<PrivateKey> {
    trace!(depth = path.len(), "hardened path derivation");
    path.iter()
        .try_fold(root.clone(), |sk, &index| derive_child_sk(&sk, index))
}

// ============================================================================
// Unhardened derivation
// ============================================================================

/// `SHA-256(parent_pk || index) mod r`
fn unhardened_offset(parent: &PublicKey, index: u32) -> Scalar {
    let digest = Sha256::new()
        .chain_update(parent.to_bytes())
        .chain_update(u32_to_be_bytes(index))
        .finalize();
    Scalar::from_be_bytes_mod_order(&digest)
}

/// Unhardened child at `index`. Its public key is
/// [`derive_child_pk_unhardened`] of the parent public key.
pub fn derive_child_sk_unhardened(parent: &PrivateKey, index: u32) -> PrivateKey {
    let offset = unhardened_offset(&parent.public_key(), index);
    PrivateKey::from_scalar(parent.scalar() + offset)
}

/// Public key of the unhardened child at `index`, without the private key
pub fn derive_child_pk_unhardened(parent: &PublicKey, index: u32) -> PublicKey {
    offset_public_key(parent, unhardened_offset(parent, index))
}

/// Fold [`derive_child_sk_unhardened`] over `path`
pub fn derive_path_unhardened(root: &PrivateKey, path: &[u32]) -> PrivateKey {
    path.iter()
        .fold(root.clone(), |sk, &index| derive_child_sk_unhardened(&sk, index))
}

/// Fold [`derive_child_pk_unhardened`] over `path`
pub fn derive_path_pk_unhardened(root: &PublicKey, path: &[u32]) -> PublicKey {
    path.iter()
        .fold(*root, |pk, &index| derive_child_pk_unhardened(&pk, index))
}

fn offset_public_key(pk: &PublicKey, offset: Scalar) -> PublicKey {
    PublicKey::from_point(G1Affine::from(
        pk.point() + G1Projective::generator() * offset,
    ))
}

// ============================================================================
// Synthetic keys
// ============================================================================

/// `SHA-256(pk || hidden_puzzle_hash) mod r`
fn synthetic_offset(pk: &PublicKey, hidden_puzzle_hash: &[u8]) -> Scalar {
    let digest = Sha256::new()
        .chain_update(pk.to_bytes())
        .chain_update(hidden_puzzle_hash)
        .finalize();
    Scalar::from_be_bytes_mod_order(&digest)
}

/// Offset `sk` by the hash of its public key and `hidden_puzzle_hash`
pub fn synthetic_sk(sk: &PrivateKey, hidden_puzzle_hash: &[u8]) -> PrivateKey {
    let offset = synthetic_offset(&sk.public_key(), hidden_puzzle_hash);
    PrivateKey::from_scalar(sk.scalar() + offset)
}

/// Public key of [`synthetic_sk`], computed from the public key alone
pub fn synthetic_pk(pk: &PublicKey, hidden_puzzle_hash: &[u8]) -> PublicKey {
    offset_public_key(pk, synthetic_offset(pk, hidden_puzzle_hash))
}

/// [`synthetic_sk`] with the default hidden puzzle hash
pub fn synthetic_sk_default(sk: &PrivateKey) -> PrivateKey {
    synthetic_sk(sk, &DEFAULT_HIDDEN_PUZZLE_HASH)
}

// ============================================================================
// Well-known paths
// ============================================================================

fn well_known_path(root: &PrivateKey, role: u32, index: u32) -> Result<PrivateKey> {
    derive_path(root, &[PATH_PURPOSE, PATH_COIN_TYPE, role, index])
}

/// `m/12381/8444/0/0`
pub fn farmer_sk(root: &PrivateKey) -> Result<PrivateKey> {
    well_known_path(root, FARMER_PATH_INDEX, 0)
}

/// `m/12381/8444/1/0`
pub fn pool_sk(root: &PrivateKey) -> Result<PrivateKey> {
    well_known_path(root, POOL_PATH_INDEX, 0)
}

/// `m/12381/8444/2/index`
pub fn wallet_sk(root: &PrivateKey, index: u32) -> Result<PrivateKey> {
    well_known_path(root, WALLET_PATH_INDEX, index)
}

/// `m/12381/8444/3/0`
pub fn local_sk(root: &PrivateKey) -> Result<PrivateKey> {
    well_known_path(root, LOCAL_PATH_INDEX, 0)
}

// ============================================================================
// Mnemonic seeds
// ============================================================================

/// 64-byte seed of a mnemonic phrase: PBKDF2-HMAC-SHA512 with salt
/// `"mnemonic" || passphrase` and 2048 rounds.
///
/// The phrase is used as given; no word-list check or Unicode
/// normalization is applied.
pub fn seed_from_mnemonic(
    mnemonic: &str,
    passphrase: &str,
) -> Zeroizing<[u8; MNEMONIC_SEED_SIZE]> {
    let mut salt = Zeroizing::new(String::with_capacity(
        MNEMONIC_SALT_PREFIX.len() + passphrase.len(),
    ));
    salt.push_str(MNEMONIC_SALT_PREFIX);
    salt.push_str(passphrase);

    let mut seed = Zeroizing::new([0u8; MNEMONIC_SEED_SIZE]);
    pbkdf2::pbkdf2::<Hmac<Sha512>>(
        mnemonic.as_bytes(),
        salt.as_bytes(),
        MNEMONIC_PBKDF2_ROUNDS,
        &mut seed[..],
    );
    seed
}

/// KeyGen on the seed of a mnemonic phrase
pub fn key_gen_with_mnemonic(mnemonic: &str, passphrase: &str) -> Result<PrivateKey> {
    let seed = seed_from_mnemonic(mnemonic, passphrase);
    AugSchemeMpl::key_gen(&seed[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_seed_key() -> PrivateKey {
        AugSchemeMpl::key_gen(&[0u8; 32]).unwrap()
    }

    fn sk_hex(sk: &PrivateKey) -> String {
        hex::encode(&sk.to_bytes()[..])
    }

    #[test]
    fn test_hardened_child_known_answer() {
        let child = derive_child_sk(&zero_seed_key(), 0).unwrap();
        assert_eq!(
            sk_hex(&child),
            "43d8736f28609934da184905272500b60c285dad536de3c7e729cc8773cb59d6"
        );
    }

    #[test]
    fn test_unhardened_child_known_answer() {
        let child = derive_child_sk_unhardened(&zero_seed_key(), 0);
        assert_eq!(
            sk_hex(&child),
            "36ca723c1b8fdc11a123d706c00ec61737e8e3ab608cb3c2a34aedc38f0e89c3"
        );
    }

    #[test]
    fn test_synthetic_default_known_answer() {
        let synthetic = synthetic_sk_default(&zero_seed_key());
        assert_eq!(
            sk_hex(&synthetic),
            "4fbb34a3fea192b5bd31417101bfc207721104fb32e8577e6f57dedc4d81d944"
        );
    }

    #[test]
    fn test_path_is_fold_of_children() {
        let root = zero_seed_key();
        let path = [12381, 8444, 2, 7];

        let mut expected = root.clone();
        for index in path {
            expected = derive_child_sk(&expected, index).unwrap();
        }
        assert_eq!(derive_path(&root, &path).unwrap(), expected);
        assert_eq!(wallet_sk(&root, 7).unwrap(), expected);
        assert_eq!(derive_path(&root, &[]).unwrap(), root);
    }

    #[test]
    fn test_well_known_paths_are_distinct() {
        let root = zero_seed_key();
        let farmer = farmer_sk(&root).unwrap();
        let pool = pool_sk(&root).unwrap();
        let local = local_sk(&root).unwrap();
        let wallet = wallet_sk(&root, 0).unwrap();

        assert_eq!(
            farmer,
            derive_path(&root, &[12381, 8444, 0, 0]).unwrap()
        );
        assert_ne!(farmer, pool);
        assert_ne!(pool, local);
        assert_ne!(local, wallet);
        assert_ne!(wallet, farmer);
    }

    #[test]
    fn test_hardened_children_differ_by_index() {
        let root = zero_seed_key();
        let a = derive_child_sk(&root, 0).unwrap();
        let b = derive_child_sk(&root, 1).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, derive_child_sk(&root, 0).unwrap());
    }

    #[test]
    fn test_unhardened_public_derivation_matches() {
        let root = zero_seed_key();
        let path = [3, 0, 0xffff_ffff];

        let sk = derive_path_unhardened(&root, &path);
        let pk = derive_path_pk_unhardened(&root.public_key(), &path);
        assert_eq!(sk.public_key(), pk);

        for index in [0u32, 1, 1 << 31] {
            assert_eq!(
                derive_child_sk_unhardened(&root, index).public_key(),
                derive_child_pk_unhardened(&root.public_key(), index)
            );
        }
    }

    #[test]
    fn test_synthetic_public_key_matches() {
        let root = zero_seed_key();
        let hidden = [0x5au8; 32];
        assert_eq!(
            synthetic_sk(&root, &hidden).public_key(),
            synthetic_pk(&root.public_key(), &hidden)
        );
        assert_ne!(synthetic_sk(&root, &hidden), synthetic_sk_default(&root));
    }

    #[test]
    fn test_mnemonic_seed() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let seed = seed_from_mnemonic(phrase, "");
        assert_eq!(
            hex::encode(&seed[..]),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );

        let sk = key_gen_with_mnemonic(phrase, "").unwrap();
        assert_eq!(
            sk_hex(&sk),
            "11da8b4a2874a49dc42984b6aa127b68ef73adddc333319c36fd0446705204a9"
        );
        assert_ne!(key_gen_with_mnemonic(phrase, "TREZOR").unwrap(), sk);
    }
}
