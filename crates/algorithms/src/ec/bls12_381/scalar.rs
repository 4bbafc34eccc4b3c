//! Scalar field `Fr` of BLS12-381, where
//! `r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`.
//!
//! Private keys live here. Their wire form is 32 big-endian bytes, while the
//! little-endian helpers follow the usual layout of the curve arithmetic.

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::ec::bls12_381::util::{adc, mac, sbb};
use crate::error::{Error, Result};

/// Element of `Fr`, four little-endian limbs in Montgomery form
#[derive(Clone, Copy, Eq)]
pub struct Scalar(pub(crate) [u64; 4]);

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.to_bytes_be().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Scalar {
        Scalar([val, 0, 0, 0]) * R2
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1u8), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar(core::array::from_fn(|i| u64::conditional_select(&a.0[i], &b.0[i], choice)))
    }
}

/// r, least significant limb first
const MODULUS: Scalar = Scalar([
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
]);

/// r - 2, the Fermat inversion exponent
const MODULUS_MINUS_TWO: [u64; 4] = [
    0xffff_fffe_ffff_ffff,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// -r^-1 mod 2^64
const INV: u64 = 0xffff_fffe_ffff_ffff;

/// 2^256 mod r, which is 1 in Montgomery form
const R: Scalar = Scalar([
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
]);

/// 2^512 mod r
const R2: Scalar = Scalar([
    0xc999_e990_f3f2_9c6d,
    0x2b6c_edcb_8792_5c23,
    0x05d3_1496_7254_398f,
    0x0748_d9d9_9f59_ff11,
]);

/// 2^768 mod r
const R3: Scalar = Scalar([
    0xc62c_1807_439b_73af,
    0x1b3e_0d18_8cf0_6990,
    0x73d1_3c71_c7b5_f418,
    0x6e2a_5bb9_c8db_33e9,
]);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        self.neg()
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        -&self
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn add(self, rhs: &'b Scalar) -> Scalar {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        self.mul(rhs)
    }
}

impl_binops_additive!(Scalar, Scalar);
impl_binops_multiplicative!(Scalar, Scalar);

impl Default for Scalar {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl zeroize::DefaultIsZeroes for Scalar {}

/// Read `N` little-endian limbs from the front of `bytes`
fn le_limbs<const N: usize>(bytes: &[u8]) -> [u64; N] {
    let mut limbs = [0u64; N];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(buf);
    }
    limbs
}

impl Scalar {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Scalar {
        Scalar([0; 4])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Scalar {
        R
    }

    /// Whether this is zero.
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Scalar::zero())
    }

    /// `2 * self`
    #[inline]
    pub const fn double(&self) -> Scalar {
        self.add(self)
    }

    /// Parse 32 little-endian bytes, rejecting values `>= r`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Scalar> {
        let limbs = le_limbs::<4>(bytes);
        let mut borrow = 0;
        for (limb, m) in limbs.iter().zip(MODULUS.0.iter()) {
            borrow = sbb(*limb, *m, borrow).1;
        }
        // a * R^2 / R lands in Montgomery form
        CtOption::new(Scalar(limbs) * R2, Choice::from((borrow & 1) as u8))
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut wide = [0u64; 8];
        wide[..4].copy_from_slice(&self.0);
        let canonical = Scalar::montgomery_reduce(wide);

        let mut res = [0; 32];
        for (chunk, limb) in res.chunks_exact_mut(8).zip(canonical.0.iter()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        res
    }

    /// Parse 32 big-endian bytes, rejecting values `>= r`.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> CtOption<Scalar> {
        let mut le = *bytes;
        le.reverse();
        Scalar::from_bytes(&le)
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut out = self.to_bytes();
        out.reverse();
        out
    }

    /// Reduce a 512-bit little-endian integer mod r.
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar {
        let limbs = le_limbs::<8>(bytes);
        let lo = Scalar([limbs[0], limbs[1], limbs[2], limbs[3]]);
        let hi = Scalar([limbs[4], limbs[5], limbs[6], limbs[7]]);
        // lo * R^2 / R = lo R and hi * R^3 / R = hi 2^256 R
        lo * R2 + hi * R3
    }

    /// Reduce a big-endian integer of any length mod r.
    ///
    /// Used wherever a hash output or HKDF block becomes a key.
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Scalar {
        let (head, rest) = bytes.split_at(bytes.len() % 32);
        let mut acc = Scalar::from_be_chunk(head);
        for chunk in rest.chunks(32) {
            // R2 is 2^256 in Montgomery form
            acc = acc * R2 + Scalar::from_be_chunk(chunk);
        }
        acc
    }

    fn from_be_chunk(chunk: &[u8]) -> Scalar {
        let mut wide = [0u8; 64];
        for (dst, src) in wide.iter_mut().zip(chunk.iter().rev()) {
            *dst = *src;
        }
        Scalar::from_bytes_wide(&wide)
    }

    /// Four little-endian limbs of a plain integer, taken mod r.
    pub const fn from_raw(val: [u64; 4]) -> Self {
        (&Scalar(val)).mul(&R2)
    }

    /// `self * self`
    #[inline]
    pub const fn square(&self) -> Scalar {
        self.mul(self)
    }

    /// `self^by` for a public exponent given as little-endian limbs.
    pub fn pow_vartime(&self, by: &[u64; 4]) -> Scalar {
        let mut acc = Scalar::one();
        for limb in by.iter().rev() {
            for i in (0..64).rev() {
                acc = acc.square();
                if (limb >> i) & 1 == 1 {
                    acc *= self;
                }
            }
        }
        acc
    }

    /// Inverse, `None` for zero.
    pub fn invert(&self) -> CtOption<Self> {
        // a^(r - 2); the exponent is public so the ladder leaks nothing
        CtOption::new(self.pow_vartime(&MODULUS_MINUS_TWO), !self.is_zero())
    }

    /// [`invert`](Self::invert) for callers that propagate errors. Fails
    /// with `NotInvertible` on zero.
    pub fn try_invert(&self) -> Result<Self> {
        Option::from(self.invert()).ok_or(Error::NotInvertible {
            operation: "Scalar::invert",
        })
    }

    // Divide a 512-bit value by 2^256 modulo r, one limb per round.
    #[inline(always)]
    const fn montgomery_reduce(wide: [u64; 8]) -> Self {
        let mut t = wide;
        let mut spill = 0;
        let mut i = 0;
        while i < 4 {
            let k = t[i].wrapping_mul(INV);
            let mut carry = 0;
            let mut j = 0;
            while j < 4 {
                (t[i + j], carry) = mac(t[i + j], k, MODULUS.0[j], carry);
                j += 1;
            }
            (t[i + 4], spill) = adc(t[i + 4], spill, carry);
            i += 1;
        }
        (&Scalar([t[4], t[5], t[6], t[7]])).sub(&MODULUS)
    }

    /// `self * rhs`
    #[inline]
    pub const fn mul(&self, rhs: &Self) -> Self {
        let mut wide = [0u64; 8];
        let mut i = 0;
        while i < 4 {
            let mut carry = 0;
            let mut j = 0;
            while j < 4 {
                (wide[i + j], carry) = mac(wide[i + j], self.0[i], rhs.0[j], carry);
                j += 1;
            }
            wide[i + 4] = carry;
            i += 1;
        }
        Scalar::montgomery_reduce(wide)
    }

    /// `self - rhs`, adding r back when the limbs borrow.
    #[inline]
    pub const fn sub(&self, rhs: &Self) -> Self {
        let mut diff = [0u64; 4];
        let mut borrow = 0;
        let mut i = 0;
        while i < 4 {
            (diff[i], borrow) = sbb(self.0[i], rhs.0[i], borrow);
            i += 1;
        }
        let mut carry = 0;
        let mut i = 0;
        while i < 4 {
            (diff[i], carry) = adc(diff[i], MODULUS.0[i] & borrow, carry);
            i += 1;
        }
        Scalar(diff)
    }

    /// `self + rhs`
    #[inline]
    pub const fn add(&self, rhs: &Self) -> Self {
        let mut sum = [0u64; 4];
        let mut carry = 0;
        let mut i = 0;
        while i < 4 {
            (sum[i], carry) = adc(self.0[i], rhs.0[i], carry);
            i += 1;
        }
        // r < 2^255, so the sum fits and one conditional subtraction reduces it
        (&Scalar(sum)).sub(&MODULUS)
    }

    /// `-self`, with zero mapping to zero rather than r.
    #[inline]
    pub const fn neg(&self) -> Self {
        let mut out = [0u64; 4];
        let mut borrow = 0;
        let mut nonzero = 0;
        let mut i = 0;
        while i < 4 {
            (out[i], borrow) = sbb(MODULUS.0[i], self.0[i], borrow);
            nonzero |= self.0[i];
            i += 1;
        }
        let mask = ((nonzero == 0) as u64).wrapping_sub(1);
        Scalar([out[0] & mask, out[1] & mask, out[2] & mask, out[3] & mask])
    }
}

impl<T> core::iter::Sum<T> for Scalar
where
    T: core::borrow::Borrow<Scalar>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::zero(), |acc, item| acc + item.borrow())
    }
}

impl<T> core::iter::Product<T> for Scalar
where
    T: core::borrow::Borrow<Scalar>,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::one(), |acc, item| acc * item.borrow())
    }
}
