//! Base field `GF(p)` of BLS12-381.
//!
//! p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab
//!
//! Elements are kept in Montgomery form with R = 2^384. Every public
//! operation here is constant time except the `*_vartime` helpers, which are
//! only ever called with public exponents.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use augbls_internal::endian::u64_from_be_at;

use crate::ec::bls12_381::util::{adc, mac, sbb};

/// Field modulus p, least significant limb first
const MODULUS: [u64; 6] = [
    0xb9fe_ffff_ffff_aaab,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// -p^-1 mod 2^64
const INV: u64 = 0x89f3_fffc_fffc_fffd;

/// 2^384 mod p, which is 1 in Montgomery form
const R: Fp = Fp([
    0x7609_0000_0002_fffd,
    0xebf4_000b_c40c_0002,
    0x5f48_9857_53c7_58ba,
    0x77ce_5853_7052_5745,
    0x5c07_1a97_a256_ec6d,
    0x15f6_5ec3_fa80_e493,
]);

/// 2^768 mod p; multiplying by it enters Montgomery form
const R2: Fp = Fp([
    0xf4df_1f34_1c34_1746,
    0x0a76_e6a6_09d1_04f1,
    0x8de5_476c_4c95_b6d5,
    0x67eb_88a9_939d_83c0,
    0x9a79_3e85_b519_952d,
    0x1198_8fe5_92ca_e3aa,
]);

/// 2^1152 mod p
const R3: Fp = Fp([
    0xed48_ac6b_d94c_a1e0,
    0x315f_831e_03a7_adf8,
    0x9a53_352a_615e_29dd,
    0x34c0_4e5e_921e_1761,
    0x2512_d435_6572_4728,
    0x0aa6_3460_9175_5d4d,
]);

/// (p - 1) / 2 + 1, the smallest canonical value whose sign bit is set
const HALF_P_PLUS_ONE: [u64; 6] = [
    0xdcff_7fff_ffff_d556,
    0x0f55_ffff_58a9_ffff,
    0xb398_6950_7b58_7b12,
    0xb23b_a5c2_79c2_895f,
    0x258d_d3db_21a5_d66b,
    0x0d00_88f5_1cbf_f34d,
];

/// An element of `GF(p)` stored as `aR mod p` in six little-endian limbs.
#[derive(Copy, Clone)]
pub struct Fp(pub(crate) [u64; 6]);

/// Borrow mask of `a - b` over six limbs: all ones when `a < b`, else zero.
#[inline(always)]
const fn borrow_of(a: &[u64; 6], b: &[u64; 6]) -> u64 {
    let mut borrow = 0;
    let mut i = 0;
    while i < 6 {
        borrow = sbb(a[i], b[i], borrow).1;
        i += 1;
    }
    borrow
}

impl Fp {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp {
        Fp([0; 6])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp {
        R
    }

    /// Whether this is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Fp::zero())
    }

    /// Wrap raw Montgomery limbs. The caller guarantees they are reduced.
    pub const fn from_raw_unchecked(v: [u64; 6]) -> Fp {
        Fp(v)
    }

    // Inputs below 2p come back below p.
    #[inline]
    const fn subtract_p(&self) -> Fp {
        let mut diff = [0u64; 6];
        let mut borrow = 0;
        let mut i = 0;
        while i < 6 {
            (diff[i], borrow) = sbb(self.0[i], MODULUS[i], borrow);
            i += 1;
        }
        // borrow set: self was already reduced
        let mut i = 0;
        while i < 6 {
            diff[i] = (self.0[i] & borrow) | (diff[i] & !borrow);
            i += 1;
        }
        Fp(diff)
    }

    /// `self + rhs`
    #[inline]
    pub const fn add(&self, rhs: &Fp) -> Fp {
        // p < 2^381, so the sum of two reduced values fits in six limbs
        let mut sum = [0u64; 6];
        let mut carry = 0;
        let mut i = 0;
        while i < 6 {
            (sum[i], carry) = adc(self.0[i], rhs.0[i], carry);
            i += 1;
        }
        Fp(sum).subtract_p()
    }

    /// `self - rhs`
    #[inline]
    pub const fn sub(&self, rhs: &Fp) -> Fp {
        (&rhs.neg()).add(self)
    }

    /// `-self`, with zero mapping to zero rather than p.
    #[inline]
    pub const fn neg(&self) -> Fp {
        let mut out = [0u64; 6];
        let mut borrow = 0;
        let mut nonzero = 0;
        let mut i = 0;
        while i < 6 {
            (out[i], borrow) = sbb(MODULUS[i], self.0[i], borrow);
            nonzero |= self.0[i];
            i += 1;
        }
        let mask = ((nonzero == 0) as u64).wrapping_sub(1);
        let mut i = 0;
        while i < 6 {
            out[i] &= mask;
            i += 1;
        }
        Fp(out)
    }

    /// `self * rhs`: schoolbook product followed by Montgomery reduction.
    #[inline]
    pub const fn mul(&self, rhs: &Fp) -> Fp {
        let mut wide = [0u64; 12];
        let mut i = 0;
        while i < 6 {
            let mut carry = 0;
            let mut j = 0;
            while j < 6 {
                (wide[i + j], carry) = mac(wide[i + j], self.0[i], rhs.0[j], carry);
                j += 1;
            }
            wide[i + 6] = carry;
            i += 1;
        }
        Self::montgomery_reduce(wide)
    }

    /// `self * self`
    #[inline]
    pub const fn square(&self) -> Self {
        self.mul(self)
    }

    /// Divide a 768-bit value by R modulo p, one limb per round.
    #[inline(always)]
    pub(crate) const fn montgomery_reduce(wide: [u64; 12]) -> Self {
        let mut t = wide;
        // carry out of the top limb touched by the previous round
        let mut spill = 0;
        let mut i = 0;
        while i < 6 {
            let k = t[i].wrapping_mul(INV);
            let mut carry = 0;
            let mut j = 0;
            while j < 6 {
                (t[i + j], carry) = mac(t[i + j], k, MODULUS[j], carry);
                j += 1;
            }
            (t[i + 6], spill) = adc(t[i + 6], spill, carry);
            i += 1;
        }
        Fp([t[6], t[7], t[8], t[9], t[10], t[11]]).subtract_p()
    }

    // Plain integer limbs, out of Montgomery form.
    #[inline]
    const fn to_canonical(&self) -> [u64; 6] {
        let mut wide = [0u64; 12];
        let mut i = 0;
        while i < 6 {
            wide[i] = self.0[i];
            i += 1;
        }
        Self::montgomery_reduce(wide).0
    }
}

impl Fp {
    /// `self^by` for a public exponent, little-endian limbs.
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    /// Square root, if one exists.
    #[inline]
    pub fn sqrt(&self) -> CtOption<Self> {
        // p = 3 mod 4, so a^((p + 1) / 4) is a root whenever one exists
        let sqrt = self.pow_vartime(&[
            0xee7f_bfff_ffff_eaab,
            0x07aa_ffff_ac54_ffff,
            0xd9cc_34a8_3dac_3d89,
            0xd91d_d2e1_3ce1_44af,
            0x92c6_e9ed_90d2_eb35,
            0x0680_447a_8e5f_f9a6,
        ]);

        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }

    /// Inverse, `None` for zero.
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        // a^(p - 2)
        let t = self.pow_vartime(&[
            0xb9fe_ffff_ffff_aaa9,
            0x1eab_fffe_b153_ffff,
            0x6730_d2a0_f6b0_f624,
            0x6477_4b84_f385_12bf,
            0x4b1b_a7b6_434b_acd7,
            0x1a01_11ea_397f_e69a,
        ]);

        CtOption::new(t, !self.is_zero())
    }

    /// Returns 1 iff the canonical value is strictly greater than (p-1)/2.
    ///
    /// This is the sign convention of the compressed point encoding.
    pub fn lexicographically_largest(&self) -> Choice {
        // the subtraction borrows exactly when the value is at most (p - 1) / 2
        let borrow = borrow_of(&self.to_canonical(), &HALF_P_PLUS_ONE);
        !Choice::from((borrow & 1) as u8)
    }

    /// Parity of the canonical value, the `sgn0` of RFC 9380 for `GF(p)`.
    pub fn sgn0(&self) -> Choice {
        Choice::from((self.to_canonical()[0] & 1) as u8)
    }
}

impl Fp {
    /// Parse 48 big-endian bytes, rejecting values `>= p`.
    pub fn from_bytes(bytes: &[u8; 48]) -> CtOption<Fp> {
        let limbs: [u64; 6] = core::array::from_fn(|i| be_u64(bytes, 40 - 8 * i));
        let canonical = Choice::from((borrow_of(&limbs, &MODULUS) & 1) as u8);
        CtOption::new(Fp(limbs) * R2, canonical)
    }

    /// Canonical 48-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 48] {
        let mut res = [0; 48];
        for (i, limb) in self.to_canonical().iter().enumerate() {
            let at = 40 - 8 * i;
            res[at..at + 8].copy_from_slice(&limb.to_be_bytes());
        }
        res
    }

    /// Reduce 64 uniformly random bytes (big-endian) modulo p.
    ///
    /// The input is split into two 256-bit halves `hi || lo`, both of which
    /// are below p, and recombined as `hi * 2^256 + lo`.
    pub fn from_okm(okm: &[u8; 64]) -> Fp {
        // 2^256 in Montgomery form
        const F_2_256: Fp = Fp([
            0x075b_3cd7_c5ce_820f,
            0x3ec6_ba62_1c3e_db0b,
            0x168a_13d8_2bff_6bce,
            0x8766_3c4b_f8c4_49d2,
            0x15f3_4c83_ddc8_d830,
            0x0f96_28b4_9caa_2e85,
        ]);

        let half = |bytes: &[u8]| {
            let mut limbs = [0u64; 6];
            for (i, limb) in limbs.iter_mut().take(4).enumerate() {
                *limb = be_u64(bytes, 24 - 8 * i);
            }
            Fp(limbs) * R2
        };

        half(&okm[..32]) * F_2_256 + half(&okm[32..])
    }

    /// Uniform element from 768 random bits.
    pub(crate) fn random(mut rng: impl RngCore) -> Fp {
        let mut bytes = [0u8; 96];
        rng.fill_bytes(&mut bytes);

        // 768 bits, least significant limb first
        let mut limbs = [0u64; 12];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = be_u64(&bytes, 88 - 8 * i);
        }
        Fp::from_u768(limbs)
    }

    /// Reduce a 768-bit little-endian limb array modulo p.
    ///
    /// lo * R^2 lands lo in Montgomery form, hi * R^3 does the same for
    /// hi * 2^384.
    fn from_u768(limbs: [u64; 12]) -> Fp {
        let lo = Fp([limbs[0], limbs[1], limbs[2], limbs[3], limbs[4], limbs[5]]);
        let hi = Fp([limbs[6], limbs[7], limbs[8], limbs[9], limbs[10], limbs[11]]);
        lo * R2 + hi * R3
    }
}

/// Big-endian u64 at `bytes[at..at + 8]`
#[inline]
fn be_u64(bytes: &[u8], at: usize) -> u64 {
    // Callers index fixed-size arrays, so the word is always present
    u64_from_be_at(bytes, at).unwrap_or_default()
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tmp = self.to_bytes();
        f.write_str("0x")?;
        for &b in tmp.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Default for Fp {
    fn default() -> Self {
        Fp::zero()
    }
}

impl zeroize::DefaultIsZeroes for Fp {}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1u8), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl Eq for Fp {}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp(core::array::from_fn(|i| u64::conditional_select(&a.0[i], &b.0[i], choice)))
    }
}

// By-reference operators; owned forms come from the binop macros
impl<'a> Neg for &'a Fp {
    type Output = Fp;
    #[inline]
    fn neg(self) -> Fp { self.neg() }
}

impl Neg for Fp {
    type Output = Fp;
    #[inline]
    fn neg(self) -> Fp { -&self }
}

impl<'a, 'b> Sub<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn sub(self, rhs: &'b Fp) -> Fp { self.sub(rhs) }
}

impl<'a, 'b> Add<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn add(self, rhs: &'b Fp) -> Fp { self.add(rhs) }
}

impl<'a, 'b> Mul<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn mul(self, rhs: &'b Fp) -> Fp { self.mul(rhs) }
}

impl_binops_additive!(Fp, Fp);
impl_binops_multiplicative!(Fp, Fp);
