//! Group law shared by G1 and G2.
//!
//! Both groups are `y^2 = x^3 + b` over their base field with `a = 0`, so the
//! complete projective formulas of <https://eprint.iacr.org/2015/1060>
//! (Algorithms 7, 8 and 9) apply unchanged. [`impl_curve_group!`] writes
//! them once per group. The invoking module supplies:
//!
//! - the `$affine` / `$projective` structs with `x`, `y`, `infinity` and
//!   `x`, `y`, `z` fields
//! - a constant `B` and a function `mul_by_3b(t) = 3 * b * t`
//! - a `clear_cofactor` method on `$projective`
//! - the `core::ops` traits and `subtle` items in scope

macro_rules! impl_curve_group {
    ($affine:ident, $projective:ident, $base:ident, $compressed:expr) => {
        impl Default for $affine {
            fn default() -> $affine {
                $affine::identity()
            }
        }

        impl Default for $projective {
            fn default() -> $projective {
                $projective::identity()
            }
        }

        impl zeroize::DefaultIsZeroes for $affine {}
        impl zeroize::DefaultIsZeroes for $projective {}

        impl core::fmt::Display for $affine {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl core::fmt::Display for $projective {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl<'a> From<&'a $projective> for $affine {
            fn from(p: &'a $projective) -> $affine {
                let zinv = p.z.invert().unwrap_or($base::zero());
                let finite = $affine {
                    x: p.x * zinv,
                    y: p.y * zinv,
                    infinity: Choice::from(0u8),
                };
                $affine::conditional_select(&finite, &$affine::identity(), zinv.is_zero())
            }
        }

        impl From<$projective> for $affine {
            fn from(p: $projective) -> $affine {
                $affine::from(&p)
            }
        }

        impl<'a> From<&'a $affine> for $projective {
            fn from(p: &'a $affine) -> $projective {
                $projective {
                    x: p.x,
                    y: p.y,
                    z: $base::conditional_select(&$base::one(), &$base::zero(), p.infinity),
                }
            }
        }

        impl From<$affine> for $projective {
            fn from(p: $affine) -> $projective {
                $projective::from(&p)
            }
        }

        impl ConstantTimeEq for $affine {
            fn ct_eq(&self, other: &Self) -> Choice {
                let both_finite = (!self.infinity) & (!other.infinity);
                (self.infinity & other.infinity)
                    | (both_finite & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
            }
        }

        // (x1 : y1 : z1) == (x2 : y2 : z2) iff the cross products agree.
        impl ConstantTimeEq for $projective {
            fn ct_eq(&self, other: &Self) -> Choice {
                let lhs_inf = self.z.is_zero();
                let rhs_inf = other.z.is_zero();
                let same_x = (self.x * other.z).ct_eq(&(other.x * self.z));
                let same_y = (self.y * other.z).ct_eq(&(other.y * self.z));
                (lhs_inf & rhs_inf) | ((!lhs_inf) & (!rhs_inf) & same_x & same_y)
            }
        }

        impl ConditionallySelectable for $affine {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                $affine {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                    infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
                }
            }
        }

        impl ConditionallySelectable for $projective {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                $projective {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                    z: $base::conditional_select(&a.z, &b.z, choice),
                }
            }
        }

        impl Eq for $affine {}
        impl PartialEq for $affine {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.ct_eq(other))
            }
        }

        impl Eq for $projective {}
        impl PartialEq for $projective {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.ct_eq(other))
            }
        }

        // The identity keeps y = 1 under negation.
        impl<'a> Neg for &'a $affine {
            type Output = $affine;

            #[inline]
            fn neg(self) -> $affine {
                $affine {
                    x: self.x,
                    y: $base::conditional_select(&-self.y, &$base::one(), self.infinity),
                    infinity: self.infinity,
                }
            }
        }

        impl Neg for $affine {
            type Output = $affine;

            #[inline]
            fn neg(self) -> $affine {
                -&self
            }
        }

        impl<'a> Neg for &'a $projective {
            type Output = $projective;

            #[inline]
            fn neg(self) -> $projective {
                $projective {
                    x: self.x,
                    y: -self.y,
                    z: self.z,
                }
            }
        }

        impl Neg for $projective {
            type Output = $projective;

            #[inline]
            fn neg(self) -> $projective {
                -&self
            }
        }

        impl<'a, 'b> Add<&'b $projective> for &'a $projective {
            type Output = $projective;

            #[inline]
            fn add(self, rhs: &'b $projective) -> $projective {
                self.add(rhs)
            }
        }

        impl<'a, 'b> Sub<&'b $projective> for &'a $projective {
            type Output = $projective;

            #[inline]
            fn sub(self, rhs: &'b $projective) -> $projective {
                self + &(-rhs)
            }
        }

        impl<'a, 'b> Add<&'b $projective> for &'a $affine {
            type Output = $projective;

            #[inline]
            fn add(self, rhs: &'b $projective) -> $projective {
                rhs.add_mixed(self)
            }
        }

        impl<'a, 'b> Add<&'b $affine> for &'a $projective {
            type Output = $projective;

            #[inline]
            fn add(self, rhs: &'b $affine) -> $projective {
                self.add_mixed(rhs)
            }
        }

        impl<'a, 'b> Sub<&'b $projective> for &'a $affine {
            type Output = $projective;

            #[inline]
            fn sub(self, rhs: &'b $projective) -> $projective {
                self + &(-rhs)
            }
        }

        impl<'a, 'b> Sub<&'b $affine> for &'a $projective {
            type Output = $projective;

            #[inline]
            fn sub(self, rhs: &'b $affine) -> $projective {
                self + &(-rhs)
            }
        }

        impl<'a, 'b> Mul<&'b Scalar> for &'a $projective {
            type Output = $projective;

            fn mul(self, by: &'b Scalar) -> $projective {
                self.multiply(&by.to_bytes())
            }
        }

        impl<'a, 'b> Mul<&'b Scalar> for &'a $affine {
            type Output = $projective;

            fn mul(self, by: &'b Scalar) -> $projective {
                $projective::from(self).multiply(&by.to_bytes())
            }
        }

        impl<'a, 'b> Mul<&'b $projective> for &'a Scalar {
            type Output = $projective;

            #[inline]
            fn mul(self, point: &'b $projective) -> $projective {
                point * self
            }
        }

        impl<'a, 'b> Mul<&'b $affine> for &'a Scalar {
            type Output = $projective;

            #[inline]
            fn mul(self, point: &'b $affine) -> $projective {
                point * self
            }
        }

        impl<T> core::iter::Sum<T> for $projective
        where
            T: core::borrow::Borrow<$projective>,
        {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = T>,
            {
                iter.fold(Self::identity(), |acc, item| acc + item.borrow())
            }
        }

        impl_binops_additive!($projective, $projective);
        impl_binops_additive!($projective, $affine);
        impl_binops_additive_specify_output!($affine, $projective, $projective);
        impl_binops_multiplicative!($projective, Scalar);
        impl_binops_multiplicative_mixed!($affine, Scalar, $projective);
        impl_binops_multiplicative_mixed!(Scalar, $affine, $projective);
        impl_binops_multiplicative_mixed!(Scalar, $projective, $projective);

        impl $affine {
            /// Point at infinity.
            pub fn identity() -> $affine {
                $affine {
                    x: $base::zero(),
                    y: $base::one(),
                    infinity: Choice::from(1u8),
                }
            }

            /// Check if point at infinity.
            #[inline]
            pub fn is_identity(&self) -> Choice {
                self.infinity
            }

            /// Curve membership check.
            pub fn is_on_curve(&self) -> Choice {
                (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
            }
        }

        impl $projective {
            /// Point at infinity.
            pub fn identity() -> $projective {
                $projective {
                    x: $base::zero(),
                    y: $base::one(),
                    z: $base::zero(),
                }
            }

            /// Fixed generator.
            pub fn generator() -> $projective {
                $projective::from($affine::generator())
            }

            /// Random non-identity point of the subgroup.
            pub fn random(mut rng: impl rand::RngCore) -> Self {
                loop {
                    let x = $base::random(&mut rng);
                    let negate = rng.next_u32() % 2 != 0;
                    let on_curve: Option<$base> = ((x.square() * x) + B).sqrt().into();
                    let Some(y) = on_curve else { continue };

                    let p = $projective::from($affine {
                        x,
                        y: if negate { -y } else { y },
                        infinity: Choice::from(0u8),
                    })
                    .clear_cofactor();
                    if !bool::from(p.is_identity()) {
                        return p;
                    }
                }
            }

            /// Point doubling (Algorithm 9).
            pub fn double(&self) -> $projective {
                let t0 = self.y.square();
                let z3 = t0 + t0;
                let z3 = z3 + z3;
                let z3 = z3 + z3;
                let t1 = self.y * self.z;
                let t2 = mul_by_3b(self.z.square());
                let x3 = t2 * z3;
                let y3 = t0 + t2;
                let z3 = t1 * z3;
                let t2 = t2 + t2 + t2;
                let t0 = t0 - t2;
                let y3 = x3 + t0 * y3;
                let x3 = t0 * (self.x * self.y);
                let x3 = x3 + x3;

                let doubled = $projective { x: x3, y: y3, z: z3 };
                let identity = $projective::identity();
                $projective::conditional_select(&doubled, &identity, self.is_identity())
            }

            /// Point addition (Algorithm 7).
            pub fn add(&self, rhs: &$projective) -> $projective {
                let t0 = self.x * rhs.x;
                let t1 = self.y * rhs.y;
                let t2 = self.z * rhs.z;
                let t3 = (self.x + self.y) * (rhs.x + rhs.y) - (t0 + t1);
                let t4 = (self.y + self.z) * (rhs.y + rhs.z) - (t1 + t2);
                let y3 = (self.x + self.z) * (rhs.x + rhs.z) - (t0 + t2);
                let t0 = t0 + t0 + t0;
                let t2 = mul_by_3b(t2);
                let z3 = t1 + t2;
                let t1 = t1 - t2;
                let y3 = mul_by_3b(y3);
                let x3 = t3 * t1 - t4 * y3;
                let y3 = t1 * z3 + y3 * t0;
                let z3 = z3 * t4 + t0 * t3;

                $projective { x: x3, y: y3, z: z3 }
            }

            /// Mixed addition with an affine point (Algorithm 8).
            pub fn add_mixed(&self, rhs: &$affine) -> $projective {
                let t0 = self.x * rhs.x;
                let t1 = self.y * rhs.y;
                let t3 = (rhs.x + rhs.y) * (self.x + self.y) - (t0 + t1);
                let t4 = rhs.y * self.z + self.y;
                let y3 = rhs.x * self.z + self.x;
                let t0 = t0 + t0 + t0;
                let t2 = mul_by_3b(self.z);
                let z3 = t1 + t2;
                let t1 = t1 - t2;
                let y3 = mul_by_3b(y3);
                let x3 = t3 * t1 - t4 * y3;
                let y3 = t1 * z3 + y3 * t0;
                let z3 = z3 * t4 + t0 * t3;

                let sum = $projective { x: x3, y: y3, z: z3 };
                $projective::conditional_select(&sum, self, rhs.is_identity())
            }

            // 256 double-and-select steps over the little-endian scalar bytes,
            // whatever their value.
            fn multiply(&self, by: &[u8; 32]) -> $projective {
                let mut acc = $projective::identity();
                for &byte in by.iter().rev() {
                    for i in (0..8).rev() {
                        acc = acc.double();
                        let bit = Choice::from((byte >> i) & 1u8);
                        acc = $projective::conditional_select(&acc, &(acc + self), bit);
                    }
                }
                acc
            }

            // [x]P for the curve parameter x, which is public.
            fn mul_by_x(&self) -> $projective {
                let mut acc = $projective::identity();
                let mut bits = super::BLS_X >> 1;
                let mut power = *self;
                while bits != 0 {
                    power = power.double();
                    if bits & 1 == 1 {
                        acc += power;
                    }
                    bits >>= 1;
                }
                if super::BLS_X_IS_NEGATIVE {
                    -acc
                } else {
                    acc
                }
            }

            /// Check if point at infinity.
            #[inline]
            pub fn is_identity(&self) -> Choice {
                self.z.is_zero()
            }

            /// Curve membership check, `y^2 z = x^3 + b z^3`.
            pub fn is_on_curve(&self) -> Choice {
                let z = self.z;
                (self.y.square() * z).ct_eq(&(self.x.square() * self.x + z.square() * z * B))
                    | z.is_zero()
            }

            /// Serialize to compressed bytes.
            pub fn to_compressed(&self) -> [u8; $compressed] {
                $affine::from(self).to_compressed()
            }
        }
    };
}
