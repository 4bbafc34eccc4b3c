//! Constants for augmented BLS signatures over BLS12-381

/// Size of a serialized private key in bytes (big-endian scalar)
pub const BLS_PRIVATE_KEY_SIZE: usize = 32;

/// Size of a compressed G1 public key in bytes
pub const BLS_PUBLIC_KEY_SIZE: usize = 48;

/// Size of a compressed G2 signature in bytes
pub const BLS_SIGNATURE_SIZE: usize = 96;

/// Ciphersuite tag of the augmented scheme; the signer's public key is
/// prepended to every message.
pub const AUG_SCHEME_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_AUG_";

/// HKDF salt used by KeyGen
pub const KEYGEN_SALT: &[u8] = b"BLS-SIG-KEYGEN-SALT-";

/// HKDF info used by KeyGen: `I2OSP(L, 2)` with an empty key_info
pub const KEYGEN_INFO: [u8; 2] = [0x00, 0x30];

/// Bytes of HKDF output reduced into a scalar
pub const KEYGEN_OKM_SIZE: usize = 48;

/// Minimum seed length accepted by KeyGen
pub const KEYGEN_MIN_SEED_SIZE: usize = 32;

/// Number of 32-byte chunks in each half of the Lamport key used by
/// hardened derivation
pub const LAMPORT_CHUNKS: usize = 255;

/// Size of a single Lamport chunk
pub const LAMPORT_CHUNK_SIZE: usize = 32;

/// First path element of every well-known key: the BLS12-381 EIP number
pub const PATH_PURPOSE: u32 = 12381;

/// Second path element of every well-known key
pub const PATH_COIN_TYPE: u32 = 8444;

/// Third path element of the farmer key
pub const FARMER_PATH_INDEX: u32 = 0;

/// Third path element of the pool key
pub const POOL_PATH_INDEX: u32 = 1;

/// Third path element of wallet keys
pub const WALLET_PATH_INDEX: u32 = 2;

/// Third path element of the local key
pub const LOCAL_PATH_INDEX: u32 = 3;

/// Hidden puzzle hash used by `synthetic_sk_default`
pub const DEFAULT_HIDDEN_PUZZLE_HASH: [u8; 32] = [
    113, 29, 108, 78, 50, 201, 46, 83, 23, 155, 25, 148, 132, 207, 140, 137, 117, 66, 188, 87,
    242, 178, 37, 130, 121, 159, 157, 101, 126, 236, 70, 153,
];

/// PBKDF2 salt prefix for mnemonic seeds; the passphrase is appended
pub const MNEMONIC_SALT_PREFIX: &str = "mnemonic";

/// PBKDF2-HMAC-SHA512 iteration count for mnemonic seeds
pub const MNEMONIC_PBKDF2_ROUNDS: u32 = 2048;

/// Size of a mnemonic seed in bytes
pub const MNEMONIC_SEED_SIZE: usize = 64;
