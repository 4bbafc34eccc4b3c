//! Augmented BLS signatures over BLS12-381
//!
//! Public keys live in G1 (48 bytes compressed) and signatures in G2
//! (96 bytes compressed). Every message is signed as `pk || message`
//! under the `..._AUG_` ciphersuite, which makes aggregation safe against
//! rogue-key attacks without proofs of possession.
//!
//! Hardened and unhardened hierarchical derivation lives in [`derive`].

use crate::error::{Error, Result};
use zeroize::Zeroizing;

/// Implements `serde` for a type with `to_hex`/`from_hex` as a `0x`-hex
/// string.
#[cfg(feature = "serde")]
macro_rules! impl_serde_hex {
    ($t:ty) => {
        impl serde::Serialize for $t {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> core::result::Result<Self, D::Error> {
                let text = zeroize::Zeroizing::new(<String as serde::Deserialize>::deserialize(
                    deserializer,
                )?);
                <$t>::from_hex(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod derive;
mod keys;
mod scheme;
mod signature;

#[cfg(test)]
mod tests;

pub use keys::{PrivateKey, PublicKey};
pub use scheme::AugSchemeMpl;
pub use signature::Signature;

/// Drop an optional `0x` prefix
fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Decode hex, with or without prefix, into exactly `N` bytes.
///
/// The decoded buffer is wiped on every path since callers pass secret
/// keys through here.
fn decode_hex_array<const N: usize>(context: &'static str, text: &str) -> Result<[u8; N]> {
    let bytes = Zeroizing::new(hex::decode(strip_hex_prefix(text.trim()))?);
    if bytes.len() != N {
        return Err(Error::InvalidLength {
            context,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn encode_hex_prefixed(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + 2 * bytes.len());
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}
