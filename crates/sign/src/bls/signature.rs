//! Signatures, points of the G2 subgroup

use core::fmt;
use core::ops::Add;

use augbls_algorithms::bls12_381::{G2Affine, G2Projective};
use augbls_params::traditional::bls::BLS_SIGNATURE_SIZE;

use super::{decode_hex_array, encode_hex_prefixed};
use crate::error::{Error, Result};

/// BLS signature
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Signature(G2Affine);

impl Signature {
    /// Size of the compressed encoding
    pub const SIZE: usize = BLS_SIGNATURE_SIZE;

    pub(crate) fn from_point(point: G2Affine) -> Self {
        Signature(point)
    }

    pub(crate) fn point(&self) -> &G2Affine {
        &self.0
    }

    /// The point at infinity. It is the neutral element of aggregation and
    /// never verifies on its own.
    pub fn identity() -> Self {
        Signature(G2Affine::identity())
    }

    /// Decode a 96-byte compressed point, checking subgroup membership.
    ///
    /// Input of any other length is an encoding failure like any other.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: &[u8; BLS_SIGNATURE_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidSignatureEncoding("expected 96 bytes"))?;
        Ok(Signature(G2Affine::from_compressed(raw)?))
    }

    /// 96-byte compressed encoding, `c1` before `c0`
    pub fn to_bytes(&self) -> [u8; BLS_SIGNATURE_SIZE] {
        self.0.to_compressed()
    }

    /// Decode from hex, with or without a `0x` prefix
    pub fn from_hex(text: &str) -> Result<Self> {
        let raw = decode_hex_array::<BLS_SIGNATURE_SIZE>("signature", text)?;
        Self::from_bytes(&raw)
    }

    /// `0x`-prefixed lowercase hex of the compressed encoding
    pub fn to_hex(&self) -> String {
        encode_hex_prefixed(&self.to_bytes())
    }

    /// Whether this is the point at infinity
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::identity()
    }
}

impl Add for Signature {
    type Output = Signature;

    fn add(self, rhs: Signature) -> Signature {
        Signature(G2Affine::from(self.0 + G2Projective::from(rhs.0)))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl_serde_hex!(Signature);
