//! G2, the prime-order subgroup of the sextic twist
//! `E'(Fp2): y^2 = x^3 + 4(u + 1)`.
//!
//! Signatures and hashed messages live here. Points are encoded with the
//! `c1` coordinate first, as in the ZCash serialization format.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::fp::Fp;
use super::field::fp2::Fp2;
use super::{compressed_rejection, compression_flags, Scalar};
use crate::error::{Error, Result};

/// G2 affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    infinity: Choice,
}

/// G2 projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl_curve_group!(G2Affine, G2Projective, Fp2, 96);

// b = 4(u + 1), both coefficients equal to the G1 constant 4
const B: Fp2 = {
    let four = Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]);
    Fp2 { c0: four, c1: four }
};

const B3: Fp2 = Fp2::add(&Fp2::add(&B, &B), &B);

#[inline(always)]
fn mul_by_3b(a: Fp2) -> Fp2 {
    a * B3
}

impl G2Affine {
    /// Fixed generator.
    pub fn generator() -> G2Affine {
        G2Affine {
            x: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0xf5f2_8fa2_0294_0a10,
                    0xb3f5_fb26_87b4_961a,
                    0xa1a8_93b5_3e2a_e580,
                    0x9894_999d_1a3c_aee9,
                    0x6f67_b763_1863_366b,
                    0x0581_9192_4350_bcd7,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xa5a9_c075_9e23_f606,
                    0xaaa0_c59d_bccd_60c3,
                    0x3bb1_7e18_e286_7806,
                    0x1b1a_b6cc_8541_b367,
                    0xc2b6_ed0e_f215_8547,
                    0x1192_2a09_7360_edf3,
                ]),
            },
            y: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x4c73_0af8_6049_4c4a,
                    0x597c_fa1f_5e36_9c5a,
                    0xe7e6_856c_aa0a_635a,
                    0xbbef_b5e9_6e0d_495f,
                    0x07d3_a975_f0ef_25a2,
                    0x0083_fd8e_7e80_dae5,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xadc0_fc92_df64_b05d,
                    0x18aa_270a_2b14_61dc,
                    0x86ad_ac6a_3be4_eba0,
                    0x7949_5c4e_c93d_a33a,
                    0xe717_5850_a43c_caed,
                    0x0b2b_c2a1_63de_1bf2,
                ]),
            },
            infinity: Choice::from(0u8),
        }
    }

    /// Compress to 96 bytes: flags and `x.c1`, then `x.c0`.
    pub fn to_compressed(&self) -> [u8; 96] {
        let x = Fp2::conditional_select(&self.x, &Fp2::zero(), self.infinity);
        let mut res = [0; 96];
        res[..48].copy_from_slice(&x.c1.to_bytes());
        res[48..].copy_from_slice(&x.c0.to_bytes());
        res[0] |= compression_flags(self.infinity, self.y.lexicographically_largest());
        res
    }

    /// Decode a compressed point, rejecting anything off the curve or outside
    /// the prime-order subgroup.
    pub fn from_compressed(bytes: &[u8; 96]) -> Result<Self> {
        let p: Option<G2Affine> = Self::from_compressed_unchecked(bytes).into();
        let p = p.ok_or_else(|| Error::encoding("G2", compressed_rejection(bytes[0])))?;

        if !bool::from(p.is_torsion_free()) {
            return Err(Error::encoding("G2", "point is not in the prime-order subgroup"));
        }
        Ok(p)
    }

    pub(crate) fn from_compressed_unchecked(bytes: &[u8; 96]) -> CtOption<Self> {
        let compressed = Choice::from((bytes[0] >> 7) & 1);
        let at_infinity = Choice::from((bytes[0] >> 6) & 1);
        let y_is_larger = Choice::from((bytes[0] >> 5) & 1);

        let mut hi = [0u8; 48];
        let mut lo = [0u8; 48];
        hi.copy_from_slice(&bytes[..48]);
        lo.copy_from_slice(&bytes[48..]);
        hi[0] &= 0b0001_1111;

        let x = Fp::from_bytes(&hi).and_then(|c1| Fp::from_bytes(&lo).map(|c0| Fp2 { c0, c1 }));
        x.and_then(|x| {
            let identity = CtOption::new(
                G2Affine::identity(),
                at_infinity & compressed & (!y_is_larger) & x.is_zero(),
            );
            identity.or_else(|| {
                ((x.square() * x) + B).sqrt().and_then(|y| {
                    let flip = y.lexicographically_largest() ^ y_is_larger;
                    let point = G2Affine {
                        x,
                        y: Fp2::conditional_select(&y, &-y, flip),
                        infinity: at_infinity,
                    };
                    CtOption::new(point, (!at_infinity) & compressed)
                })
            })
        })
    }

    /// Subgroup check `psi(P) == [x]P`, see <https://eprint.iacr.org/2021/1130>.
    pub fn is_torsion_free(&self) -> Choice {
        let p = G2Projective::from(*self);
        p.psi().ct_eq(&p.mul_by_x())
    }
}

impl G2Projective {
    /// Map a point of the twist into G2 with the Budroni-Pintore chain
    /// `[x^2 - x - 1]P + [x - 1]psi(P) + psi^2(2P)`.
    pub fn clear_cofactor(&self) -> G2Projective {
        let t1 = self.mul_by_x();
        let t2 = self.psi();
        self.double().psi2() + (t1 + t2).mul_by_x() - t1 - t2 - *self
    }

    /// Apply psi endomorphism.
    fn psi(&self) -> G2Projective {
        // 1 / ((u+1) ^ ((q-1)/3))
        let psi_coeff_x = Fp2 {
            c0: Fp::zero(),
            c1: Fp::from_raw_unchecked([
                0x890d_c9e4_8675_45c3,
                0x2af3_2253_3285_a5d5,
                0x5088_0866_309b_7e2c,
                0xa20d_1b8c_7e88_1024,
                0x14e4_f04f_e2db_9068,
                0x14e5_6d3f_1564_853a,
            ]),
        };
        // 1 / ((u+1) ^ (p-1)/2)
        let psi_coeff_y = Fp2 {
            c0: Fp::from_raw_unchecked([
                0x3e2f_585d_a55c_9ad1,
                0x4294_213d_86c1_8183,
                0x3828_44c8_8b62_3732,
                0x92ad_2afd_1910_3e18,
                0x1d79_4e4f_ac7c_f0b9,
                0x0bd5_92fc_7d82_5ec8,
            ]),
            c1: Fp::from_raw_unchecked([
                0x7bcf_a7a2_5aa3_0fda,
                0xdc17_dec1_2a92_7e7c,
                0x2f08_8dd8_6b4e_bef1,
                0xd1ca_2087_da74_d4a7,
                0x2da2_5966_96ce_bc1d,
                0x0e2b_7eed_bbfd_87d2,
            ]),
        };

        G2Projective {
            x: self.x.frobenius_map() * psi_coeff_x,
            y: self.y.frobenius_map() * psi_coeff_y,
            z: self.z.frobenius_map(),
        }
    }

    /// Apply psi^2 endomorphism.
    fn psi2(&self) -> G2Projective {
        // 1 / 2 ^ ((q-1)/3)
        let psi2_coeff_x = Fp2 {
            c0: Fp::from_raw_unchecked([
                0xcd03_c9e4_8671_f071,
                0x5dab_2246_1fcd_a5d2,
                0x5870_42af_d385_1b95,
                0x8eb6_0ebe_01ba_cb9e,
                0x03f9_7d6e_83d0_50d2,
                0x18f0_2065_5463_8741,
            ]),
            c1: Fp::zero(),
        };

        G2Projective {
            x: self.x * psi2_coeff_x,
            y: self.y.neg(),
            z: self.z,
        }
    }
}
