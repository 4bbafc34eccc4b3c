//! G1, the prime-order subgroup of `E(Fp): y^2 = x^3 + 4`.
//!
//! Public keys live here.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::fp::Fp;
use super::{compressed_rejection, compression_flags, Scalar};
use crate::error::{Error, Result};

/// G1 affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    infinity: Choice,
}

/// G1 projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl_curve_group!(G1Affine, G1Projective, Fp, 48);

// Curve parameter b = 4
const B: Fp = Fp::from_raw_unchecked([
    0xaa27_0000_000c_fff3,
    0x53cc_0032_fc34_000a,
    0x478f_e97a_6b0a_807f,
    0xb1d3_7ebe_e6ba_24d7,
    0x8ec9_733b_bf78_ab2f,
    0x09d6_4551_3d83_de7e,
]);

#[inline(always)]
fn mul_by_3b(a: Fp) -> Fp {
    let a = a + a; // 2
    let a = a + a; // 4
    a + a + a // 12
}

/// Cube root of unity in Fp
pub const BETA: Fp = Fp::from_raw_unchecked([
    0x30f1_361b_798a_64e8,
    0xf3b8_ddab_7ece_5a2a,
    0x16a8_ca3a_c615_77f7,
    0xc26a_2ff8_74fd_029b,
    0x3636_b766_6070_1c6e,
    0x051b_a4ab_241b_6160,
]);

impl G1Affine {
    /// Fixed generator.
    pub fn generator() -> G1Affine {
        G1Affine {
            x: Fp::from_raw_unchecked([
                0x5cb3_8790_fd53_0c16,
                0x7817_fc67_9976_fff5,
                0x154f_95c7_143b_a1c1,
                0xf0ae_6acd_f3d0_e747,
                0xedce_6ecc_21db_f440,
                0x1201_7741_9e0b_fb75,
            ]),
            y: Fp::from_raw_unchecked([
                0xbaac_93d5_0ce7_2271,
                0x8c22_631a_7918_fd8e,
                0xdd59_5f13_5707_25ce,
                0x51ac_5829_5040_5194,
                0x0e1c_8c3f_ad00_59c0,
                0x0bbc_3efc_5008_a26a,
            ]),
            infinity: Choice::from(0u8),
        }
    }

    /// Subgroup check: `-[x^2]P == phi(P)`, where `phi` scales x by a cube
    /// root of unity.
    pub fn is_torsion_free(&self) -> Choice {
        let lhs = -G1Projective::from(self).mul_by_x().mul_by_x();
        let mut phi = *self;
        phi.x *= BETA;
        lhs.ct_eq(&G1Projective::from(phi))
    }

    /// Compress to 48 bytes: the x coordinate with the compression,
    /// infinity and sign flags in the top three bits.
    pub fn to_compressed(&self) -> [u8; 48] {
        let mut res = Fp::conditional_select(&self.x, &Fp::zero(), self.infinity).to_bytes();
        res[0] |= compression_flags(self.infinity, self.y.lexicographically_largest());
        res
    }

    /// Decode a compressed point, rejecting anything off the curve or outside
    /// the prime-order subgroup.
    pub fn from_compressed(bytes: &[u8; 48]) -> Result<Self> {
        let p: Option<G1Affine> = Self::from_compressed_unchecked(bytes).into();
        let p = p.ok_or_else(|| Error::encoding("G1", compressed_rejection(bytes[0])))?;

        if !bool::from(p.is_torsion_free()) {
            return Err(Error::encoding("G1", "point is not in the prime-order subgroup"));
        }
        Ok(p)
    }

    /// Decode a compressed point, checking the curve equation but not the
    /// subgroup.
    pub(crate) fn from_compressed_unchecked(bytes: &[u8; 48]) -> CtOption<Self> {
        let compressed = Choice::from((bytes[0] >> 7) & 1);
        let at_infinity = Choice::from((bytes[0] >> 6) & 1);
        let y_is_larger = Choice::from((bytes[0] >> 5) & 1);
        let mut x_bytes = *bytes;
        x_bytes[0] &= 0b0001_1111;

        Fp::from_bytes(&x_bytes).and_then(|x| {
            let identity = CtOption::new(
                G1Affine::identity(),
                at_infinity & compressed & (!y_is_larger) & x.is_zero(),
            );
            identity.or_else(|| {
                ((x.square() * x) + B).sqrt().and_then(|y| {
                    let flip = y.lexicographically_largest() ^ y_is_larger;
                    let point = G1Affine {
                        x,
                        y: Fp::conditional_select(&y, &-y, flip),
                        infinity: at_infinity,
                    };
                    CtOption::new(point, (!at_infinity) & compressed)
                })
            })
        })
    }
}

impl G1Projective {
    /// Clear the cofactor by multiplying with `1 - x`.
    pub fn clear_cofactor(&self) -> G1Projective {
        self - &self.mul_by_x()
    }
}
