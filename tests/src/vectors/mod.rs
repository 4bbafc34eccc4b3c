//! Known-answer vectors for KeyGen, signing, derivation and hash-to-G2.
//!
//! The vectors are embedded at compile time from
//! `bls_known_answers.json`, so tests never depend on the working
//! directory.

pub mod error;
pub mod model;

pub use error::{Result, VectorError};
pub use model::*;

const KNOWN_ANSWERS: &str = include_str!("bls_known_answers.json");

/// Parse the embedded vector file
pub fn load() -> Result<VectorFile> {
    Ok(serde_json::from_str(KNOWN_ANSWERS)?)
}

/// Decode a hex field, naming it in the error
pub fn decode(field: &'static str, text: &str) -> Result<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|source| VectorError::Hex { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_file_parses() {
        let file = load().unwrap();
        assert_eq!(file.keygen.len(), 3);
        assert_eq!(file.hash_to_g2.cases.len(), 2);
        assert_eq!(file.mnemonic.len(), 1);

        for v in &file.keygen {
            assert!(decode("seed", &v.seed).unwrap().len() >= 32);
            assert_eq!(decode("signature", &v.signature).unwrap().len(), 96);
        }
    }

    #[test]
    fn test_decode_names_field() {
        let err = decode("pk", "0xzz").unwrap_err();
        assert!(err.to_string().starts_with("hex decode error in pk"));
    }
}
