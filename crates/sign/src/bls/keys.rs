//! Private and public keys
//!
//! A private key is a non-zero scalar below the group order `r`; its
//! public key is `sk * G1`. Both exchange fixed-size big-endian or
//! compressed encodings and a `0x`-prefixed hex form.

use core::fmt;
use core::ops::Add;

use augbls_algorithms::bls12_381::{G1Affine, G1Projective, Scalar};
use augbls_internal::endian::u32_from_be_prefix;
use augbls_params::traditional::bls::{BLS_PRIVATE_KEY_SIZE, BLS_PUBLIC_KEY_SIZE};
use augbls_params::utils::hash::FINGERPRINT_SIZE;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{decode_hex_array, encode_hex_prefixed};
use crate::error::{Error, Result};

/// BLS private key
///
/// Wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(Scalar);

impl PrivateKey {
    /// Size of the big-endian encoding
    pub const SIZE: usize = BLS_PRIVATE_KEY_SIZE;

    pub(crate) fn from_scalar(scalar: Scalar) -> Self {
        PrivateKey(scalar)
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }

    /// Import a key from its 32-byte big-endian encoding.
    ///
    /// Rejects zero and values not below the group order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: Zeroizing<[u8; BLS_PRIVATE_KEY_SIZE]> =
            Zeroizing::new(bytes.try_into().map_err(|_| Error::InvalidLength {
                context: "private key",
                expected: BLS_PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            })?);

        let scalar = Option::<Scalar>::from(Scalar::from_bytes_be(&raw))
            .ok_or(Error::InvalidPrivateKey("value is not below the group order"))?;
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidPrivateKey("value is zero"));
        }
        Ok(PrivateKey(scalar))
    }

    /// 32-byte big-endian encoding
    pub fn to_bytes(&self) -> Zeroizing<[u8; BLS_PRIVATE_KEY_SIZE]> {
        Zeroizing::new(self.0.to_bytes_be())
    }

    /// Import a key from hex, with or without a `0x` prefix
    pub fn from_hex(text: &str) -> Result<Self> {
        let raw = Zeroizing::new(decode_hex_array::<BLS_PRIVATE_KEY_SIZE>(
            "private key",
            text,
        )?);
        Self::from_bytes(&raw[..])
    }

    /// `0x`-prefixed lowercase hex of the encoding
    pub fn to_hex(&self) -> Zeroizing<String> {
        let bytes = self.to_bytes();
        let mut digits = Zeroizing::new([0u8; 2 * BLS_PRIVATE_KEY_SIZE]);
        let mut out = Zeroizing::new(String::with_capacity(2 + digits.len()));
        out.push_str("0x");
        // Lengths match, so encoding cannot fail
        if hex::encode_to_slice(&bytes[..], &mut digits[..]).is_ok() {
            out.extend(digits.iter().map(|&d| char::from(d)));
        }
        out
    }

    /// `sk * G1`
    pub fn public_key(&self) -> PublicKey {
        PublicKey(G1Affine::from(G1Projective::generator() * self.0))
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

/// BLS public key, a point of the G1 subgroup
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PublicKey(G1Affine);

impl PublicKey {
    /// Size of the compressed encoding
    pub const SIZE: usize = BLS_PUBLIC_KEY_SIZE;

    pub(crate) fn from_point(point: G1Affine) -> Self {
        PublicKey(point)
    }

    pub(crate) fn point(&self) -> &G1Affine {
        &self.0
    }

    /// Decode a 48-byte compressed point, checking subgroup membership
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: &[u8; BLS_PUBLIC_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidPublicKey("expected 48 bytes"))?;
        Ok(PublicKey(G1Affine::from_compressed(raw)?))
    }

    /// 48-byte compressed encoding
    pub fn to_bytes(&self) -> [u8; BLS_PUBLIC_KEY_SIZE] {
        self.0.to_compressed()
    }

    /// Decode from hex, with or without a `0x` prefix
    pub fn from_hex(text: &str) -> Result<Self> {
        let raw = decode_hex_array::<BLS_PUBLIC_KEY_SIZE>("public key", text)?;
        Self::from_bytes(&raw)
    }

    /// `0x`-prefixed lowercase hex of the compressed encoding
    pub fn to_hex(&self) -> String {
        encode_hex_prefixed(&self.to_bytes())
    }

    /// First four bytes of `SHA-256(pk)` read as a big-endian integer
    pub fn fingerprint(&self) -> u32 {
        let digest = Sha256::digest(self.to_bytes());
        u32_from_be_prefix(&digest[..FINGERPRINT_SIZE]).unwrap_or_default()
    }

    /// Decimal form of [`fingerprint`](Self::fingerprint), as wallets
    /// display it
    pub fn fingerprint_string(&self) -> String {
        self.fingerprint().to_string()
    }

    /// Whether this is the point at infinity, which never verifies
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

impl Add for PublicKey {
    type Output = PublicKey;

    fn add(self, rhs: PublicKey) -> PublicKey {
        PublicKey(G1Affine::from(self.0 + G1Projective::from(rhs.0)))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl_serde_hex!(PublicKey);

#[cfg(feature = "serde")]
impl_serde_hex!(PrivateKey);
