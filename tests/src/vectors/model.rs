//! Shape of `bls_known_answers.json`

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct VectorFile {
    pub keygen: Vec<KeyGenVector>,
    pub hash_to_g2: HashToG2Suite,
    pub mnemonic: Vec<MnemonicVector>,
}

/// A KeyGen seed and everything derived from it
#[derive(Debug, Clone, Deserialize)]
pub struct KeyGenVector {
    pub seed: String,
    pub sk: String,
    pub pk: String,
    pub fingerprint: u32,
    /// Hex of the signed message
    pub message: String,
    pub signature: String,
    pub children: ChildVectors,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildVectors {
    pub hardened_0: String,
    pub unhardened_0: String,
    /// `m/12381/8444/0/0`
    pub farmer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashToG2Suite {
    pub dst: String,
    pub cases: Vec<HashToG2Case>,
}

/// Message hex and the compressed image of `hash_to_g2`
#[derive(Debug, Clone, Deserialize)]
pub struct HashToG2Case {
    pub msg: String,
    pub point: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MnemonicVector {
    pub phrase: String,
    pub passphrase: String,
    pub seed: String,
    pub sk: String,
}
