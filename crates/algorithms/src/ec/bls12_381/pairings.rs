//! Optimal ate pairing `e: G1 x G2 -> Gt`.
//!
//! The Miller loop runs over the bits of the curve parameter `x` with line
//! coefficients taken from a [`G2Prepared`] table, and the final
//! exponentiation follows <https://eprint.iacr.org/2020/875>, which raises to
//! `3 (p^12 - 1) / r`. Every verification in this workspace reduces to one
//! [`PairingBatch::check`].

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field::fp::Fp;
use super::field::fp12::Fp12;
use super::field::fp2::Fp2;
use super::field::fp6::Fp6;
use super::{G1Affine, G2Affine, G2Projective, Scalar, BLS_X, BLS_X_IS_NEGATIVE};

/// Output of the Miller loop, not yet a canonical `Gt` element.
#[derive(Copy, Clone, Debug, Default)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl ConditionallySelectable for MillerLoopResult {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        MillerLoopResult(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl MillerLoopResult {
    /// Map into `Gt`.
    pub fn final_exponentiation(&self) -> Gt {
        // Only the zero element has no inverse; a Miller loop never yields it.
        let f = self.0;
        let t0 = f.frobenius_map(6);
        let t1 = f.invert().unwrap_or(Fp12::zero());

        // Easy part: f^((p^6 - 1)(p^2 + 1))
        let t2 = t0 * t1;
        let t1 = t2;
        let t2 = t2.frobenius_map(2) * t1;

        // Hard part
        let t1 = cyclotomic_square(&t2).conjugate();
        let t3 = cyclotomic_exp(&t2);
        let t4 = cyclotomic_square(&t3);
        let t5 = t1 * t3;
        let t1 = cyclotomic_exp(&t5);
        let t0 = cyclotomic_exp(&t1);
        let t6 = cyclotomic_exp(&t0) * t4;
        let t4 = cyclotomic_exp(&t6);
        let t5 = t5.conjugate();
        let t4 = t4 * (t5 * t2);
        let t5 = t2.conjugate();
        let t1 = (t1 * t2).frobenius_map(3);
        let t6 = (t6 * t5).frobenius_map(1);
        let t3 = (t3 * t0).frobenius_map(2) * t1 * t6;

        Gt(t3 * t4)
    }
}

impl<'a, 'b> Add<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn add(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_add_binop_specify_output!(MillerLoopResult, MillerLoopResult, MillerLoopResult);

impl AddAssign<MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: MillerLoopResult) {
        *self = &*self + &rhs;
    }
}

// Squaring in Fp4 = Fp2[y] / (y^2 - (u + 1)), the building block of the
// Granger-Scott cyclotomic square.
fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
    let t0 = a.square();
    let t1 = b.square();
    let c0 = t1.mul_by_nonresidue() + t0;
    let c1 = (a + b).square() - t0 - t1;
    (c0, c1)
}

/// Squaring for elements of the cyclotomic subgroup,
/// <https://eprint.iacr.org/2009/565>.
fn cyclotomic_square(f: &Fp12) -> Fp12 {
    let mut z0 = f.c0.c0;
    let mut z4 = f.c0.c1;
    let mut z3 = f.c0.c2;
    let mut z2 = f.c1.c0;
    let mut z1 = f.c1.c1;
    let mut z5 = f.c1.c2;

    let (t0, t1) = fp4_square(z0, z1);
    z0 = t0 - z0;
    z0 = z0 + z0 + t0;
    z1 = t1 + z1;
    z1 = z1 + z1 + t1;

    let (t0, t1) = fp4_square(z2, z3);
    let (t2, t3) = fp4_square(z4, z5);

    z4 = t0 - z4;
    z4 = z4 + z4 + t0;
    z5 = t1 + z5;
    z5 = z5 + z5 + t1;

    let t0 = t3.mul_by_nonresidue();
    z2 = t0 + z2;
    z2 = z2 + z2 + t0;
    z3 = t2 - z3;
    z3 = z3 + z3 + t2;

    Fp12 {
        c0: Fp6 {
            c0: z0,
            c1: z4,
            c2: z3,
        },
        c1: Fp6 {
            c0: z2,
            c1: z1,
            c2: z5,
        },
    }
}

/// `f^x` for cyclotomic `f`; `x` is negative, hence the final conjugation.
fn cyclotomic_exp(f: &Fp12) -> Fp12 {
    let mut tmp = Fp12::one();
    let mut found_one = false;
    for i in (0..64).rev().map(|b| ((BLS_X >> b) & 1) == 1) {
        if found_one {
            tmp = cyclotomic_square(&tmp);
        } else {
            found_one = i;
        }

        if i {
            tmp *= f;
        }
    }

    if BLS_X_IS_NEGATIVE {
        tmp.conjugate()
    } else {
        tmp
    }
}

/// Element of the order-`r` subgroup of `Fp12^*`, written additively.
///
/// Values produced by [`pairing`] are the cubes of the textbook
/// `(p^12 - 1) / r` pairing values, because of the final exponentiation
/// chain. Pairing-product checks against the identity are unaffected.
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Self {
        Self::identity()
    }
}

impl zeroize::DefaultIsZeroes for Gt {}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Eq for Gt {}
impl PartialEq for Gt {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Gt {
    /// Group identity, the element 1 of Fp12.
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// `e(G1::generator(), G2::generator())`
    pub fn generator() -> Gt {
        Gt(GT_GENERATOR)
    }

    /// Check for the identity.
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::identity())
    }

    /// Group doubling, which squares the underlying Fp12 element.
    #[inline]
    pub fn double(&self) -> Gt {
        Gt(cyclotomic_square(&self.0))
    }
}

impl<'a> Neg for &'a Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        // Inversion is conjugation in the cyclotomic subgroup
        Gt(self.0.conjugate())
    }
}

impl Neg for Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        -&self
    }
}

impl<'a, 'b> Add<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn add(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl<'a, 'b> Sub<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn sub(self, rhs: &'b Gt) -> Gt {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Gt {
    type Output = Gt;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        let mut acc = Gt::identity();

        // 256 steps over the little-endian scalar bytes, most significant
        // bit first, independent of the scalar's value.
        for bit in other
            .to_bytes()
            .iter()
            .rev()
            .flat_map(|byte| (0..8).rev().map(move |i| Choice::from((byte >> i) & 1u8)))
        {
            acc = acc.double();
            acc = Gt::conditional_select(&acc, &(acc + self), bit);
        }

        acc
    }
}

impl_binops_additive!(Gt, Gt);
impl_binops_multiplicative!(Gt, Scalar);

impl<T> Sum<T> for Gt
where
    T: Borrow<Gt>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

const GT_GENERATOR: Fp12 = Fp12 {
    c0: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x1972_e433_a01f_85c5,
                0x97d3_2b76_fd77_2538,
                0xc8ce_546f_c96b_cdf9,
                0xcef6_3e73_66d4_0614,
                0xa611_3427_8184_3780,
                0x13f3_448a_3fc6_d825,
            ]),
            c1: Fp::from_raw_unchecked([
                0xd263_31b0_2e9d_6995,
                0x9d68_a482_f779_7e7d,
                0x9c9b_2924_8d39_ea92,
                0xf480_1ca2_e131_07aa,
                0xa16c_0732_bdbc_b066,
                0x083c_a4af_ba36_0478,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x59e2_61db_0916_b641,
                0x2716_b6f4_b23e_960d,
                0xc8e5_5b10_a0bd_9c45,
                0x0bdb_0bd9_9c4d_eda8,
                0x8cf8_9ebf_57fd_aac5,
                0x12d6_b792_9e77_7a5e,
            ]),
            c1: Fp::from_raw_unchecked([
                0x5fc8_5188_b0e1_5f35,
                0x34a0_6e3a_8f09_6365,
                0xdb31_26a6_e02a_d62c,
                0xfc6f_5aa9_7d9a_990b,
                0xa12f_55f5_eb89_c210,
                0x1723_703a_926f_8889,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x9358_8f29_7182_8778,
                0x43f6_5b86_11ab_7585,
                0x3183_aaf5_ec27_9fdf,
                0xfa73_d7e1_8ac9_9df6,
                0x64e1_76a6_a64c_99b0,
                0x179f_a78c_5838_8f1f,
            ]),
            c1: Fp::from_raw_unchecked([
                0x672a_0a11_ca2a_ef12,
                0x0d11_b9b5_2aa3_f16b,
                0xa444_12d0_699d_056e,
                0xc01d_0177_221a_5ba5,
                0x66e0_cede_6c73_5529,
                0x05f5_a71e_9fdd_c339,
            ]),
        },
    },
    c1: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0xd30a_88a1_b062_c679,
                0x5ac5_6a5d_35fc_8304,
                0xd0c8_34a6_a81f_290d,
                0xcd54_30c2_da37_07c7,
                0xf0c2_7ff7_8050_0af0,
                0x0924_5da6_e2d7_2eae,
            ]),
            c1: Fp::from_raw_unchecked([
                0x9f2e_0676_791b_5156,
                0xe2d1_c823_4918_fe13,
                0x4c9e_459f_3c56_1bf4,
                0xa3e8_5e53_b9d3_e3c1,
                0x820a_121e_21a7_0020,
                0x15af_6183_41c5_9acc,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x7c95_658c_2499_3ab1,
                0x73eb_3872_1ca8_86b9,
                0x5256_d749_4774_34bc,
                0x8ba4_1902_ea50_4a8b,
                0x04a3_d3f8_0c86_ce6d,
                0x18a6_4a87_fb68_6eaa,
            ]),
            c1: Fp::from_raw_unchecked([
                0xbb83_e71b_b920_cf26,
                0x2a52_77ac_92a7_3945,
                0xfc0e_e59f_94f0_46a0,
                0x7158_cdf3_7860_58f7,
                0x7cc1_061b_82f9_45f6,
                0x03f8_47aa_9fdb_e567,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x8078_dba5_6134_e657,
                0x1cd7_ec9a_4399_8a6e,
                0xb1aa_599a_1a99_3766,
                0xc9a0_f62f_0842_ee44,
                0x8e15_9be3_b605_dffa,
                0x0c86_ba0d_4af1_3fc2,
            ]),
            c1: Fp::from_raw_unchecked([
                0xe80f_f2a0_6a52_ffb1,
                0x7694_ca48_721a_906c,
                0x7583_183e_03b0_8514,
                0xf567_afdd_40ce_e4e2,
                0x9a6d_96d2_e526_a5fc,
                0x197e_9f49_861f_2242,
            ]),
        },
    },
};

/// Line coefficients of a G2 point for every step of the Miller loop.
///
/// Preparing once lets the same point take part in many pairings.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coeffs: Vec<(Fp2, Fp2, Fp2)>,
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        let infinity = q.is_identity();
        // The identity pairs to one; run on the generator and mask later.
        let q = G2Affine::conditional_select(&q, &G2Affine::generator(), infinity);

        let mut coeffs = Vec::with_capacity(68);
        let mut cur = G2Projective::from(q);

        for bit in loop_bits() {
            coeffs.push(doubling_step(&mut cur));
            if bit {
                coeffs.push(addition_step(&mut cur, &q));
            }
        }
        coeffs.push(doubling_step(&mut cur));

        G2Prepared { infinity, coeffs }
    }
}

impl G2Prepared {
    /// Whether the prepared point was the identity.
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }
}

// Bits of |x| / 2 below the leading one, most significant first.
fn loop_bits() -> impl Iterator<Item = bool> {
    let x = BLS_X >> 1;
    let top = 63 - x.leading_zeros();
    (0..top).rev().map(move |b| ((x >> b) & 1) == 1)
}

/// Runs the Miller loop for every `(P, Q)` term at once and multiplies the
/// results, so a product of pairings costs one loop and one final
/// exponentiation.
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    let mut f = Fp12::one();
    let mut idx = 0;

    let step = |f: Fp12, idx: usize| {
        terms.iter().fold(f, |f, (p, q)| {
            let either_identity = p.is_identity() | q.infinity;
            let coeffs = q.coeffs.get(idx).copied().unwrap_or_default();
            let next = ell(&f, &coeffs, p);
            Fp12::conditional_select(&next, &f, either_identity)
        })
    };

    for bit in loop_bits() {
        f = step(f, idx);
        idx += 1;
        if bit {
            f = step(f, idx);
            idx += 1;
        }
        f = f.square();
    }
    f = step(f, idx);

    if BLS_X_IS_NEGATIVE {
        f = f.conjugate();
    }

    MillerLoopResult(f)
}

/// The pairing of a single pair of points.
///
/// The result is `e(p, q)^3` for the reduced Tate-style exponent
/// `(p^12 - 1) / r`. Since 3 is coprime to `r` this is still a
/// non-degenerate bilinear map, but it does not equal values from
/// libraries that use the plain exponent.
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let q = G2Prepared::from(*q);
    multi_miller_loop(&[(p, &q)]).final_exponentiation()
}

/// Pending product-of-pairings check.
///
/// Pairs are accumulated with [`add_pair`](Self::add_pair) and evaluated by
/// [`check`](Self::check), which is true iff `sum e(P_i, Q_i)` is the
/// identity of `Gt`.
#[derive(Clone, Debug, Default)]
pub struct PairingBatch {
    terms: Vec<(G1Affine, G2Prepared)>,
}

impl PairingBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `e(p, q)`.
    pub fn add_pair(&mut self, p: &G1Affine, q: &G2Affine) -> &mut Self {
        self.terms.push((*p, G2Prepared::from(*q)));
        self
    }

    /// Queue `e(p, q)` for an already prepared `q`.
    pub fn add_prepared(&mut self, p: &G1Affine, q: G2Prepared) -> &mut Self {
        self.terms.push((*p, q));
        self
    }

    /// Number of queued pairs.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the product of all queued pairings against the identity.
    pub fn check(&self) -> bool {
        let refs: Vec<(&G1Affine, &G2Prepared)> =
            self.terms.iter().map(|(p, q)| (p, q)).collect();
        let result = multi_miller_loop(&refs).final_exponentiation();
        bool::from(result.is_identity())
    }
}

fn ell(f: &Fp12, coeffs: &(Fp2, Fp2, Fp2), p: &G1Affine) -> Fp12 {
    let mut c0 = coeffs.0;
    let mut c1 = coeffs.1;

    c0.c0 *= p.y;
    c0.c1 *= p.y;

    c1.c0 *= p.x;
    c1.c1 *= p.x;

    f.mul_by_014(&coeffs.2, &c1, &c0)
}

// Jacobian doubling of `r` that also returns the tangent line,
// <https://eprint.iacr.org/2010/354>, Algorithm 26.
fn doubling_step(r: &mut G2Projective) -> (Fp2, Fp2, Fp2) {
    let tmp0 = r.x.square();
    let tmp1 = r.y.square();
    let tmp2 = tmp1.square();
    let tmp3 = (tmp1 + r.x).square() - tmp0 - tmp2;
    let tmp3 = tmp3 + tmp3;
    let tmp4 = tmp0 + tmp0 + tmp0;
    let mut tmp6 = r.x + tmp4;
    let tmp5 = tmp4.square();
    let zsquared = r.z.square();
    r.x = tmp5 - tmp3 - tmp3;
    r.z = (r.z + r.y).square() - tmp1 - zsquared;
    r.y = (tmp3 - r.x) * tmp4;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    r.y -= tmp2;
    let tmp3 = tmp4 * zsquared;
    let tmp3 = tmp3 + tmp3;
    let tmp3 = -tmp3;
    tmp6 = tmp6.square() - tmp0 - tmp5;
    let tmp1 = tmp1 + tmp1;
    let tmp1 = tmp1 + tmp1;
    tmp6 -= tmp1;
    let tmp0 = r.z * zsquared;
    let tmp0 = tmp0 + tmp0;

    (tmp0, tmp3, tmp6)
}

// Mixed Jacobian addition `r + q` with the chord line, Algorithm 27 of the
// same paper.
fn addition_step(r: &mut G2Projective, q: &G2Affine) -> (Fp2, Fp2, Fp2) {
    let zsquared = r.z.square();
    let ysquared = q.y.square();
    let t0 = zsquared * q.x;
    let t1 = ((q.y + r.z).square() - ysquared - zsquared) * zsquared;
    let t2 = t0 - r.x;
    let t3 = t2.square();
    let t4 = t3 + t3;
    let t4 = t4 + t4;
    let t5 = t4 * t2;
    let t6 = t1 - r.y - r.y;
    let t9 = t6 * q.x;
    let t7 = t4 * r.x;
    r.x = t6.square() - t5 - t7 - t7;
    r.z = (r.z + t2).square() - zsquared - t3;
    let t10 = q.y + r.z;
    let t8 = (t7 - r.x) * t6;
    let t0 = r.y * t5;
    let t0 = t0 + t0;
    r.y = t8 - t0;
    let t10 = t10.square() - ysquared;
    let ztsquared = r.z.square();
    let t10 = t10 - ztsquared;
    let t9 = t9 + t9 - t10;
    let t10 = r.z + r.z;
    let t6 = -t6;
    let t1 = t6 + t6;

    (t10, t1, t9)
}
