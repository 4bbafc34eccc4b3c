//! The BLS12-381 pairing-friendly curve.
//!
//! G1 is defined over `Fp`, G2 over the quadratic extension `Fp2`, and the
//! pairing lands in `Fp12`. Scalars of both groups live in [`Scalar`], the
//! field of prime order `r`.
//!
//! Points decode only from the 48/96-byte compressed encodings and are
//! checked for subgroup membership on the way in.

#[macro_use]
mod util;
#[macro_use]
mod curve;

pub mod field;
mod g1;
mod g2;
mod hash_to_curve;
mod pairings;
mod scalar;

#[cfg(test)]
mod tests;

pub use g1::{G1Affine, G1Projective};
pub use g2::{G2Affine, G2Projective};
pub use hash_to_curve::{expand_message_xmd, hash_to_field, hash_to_g2};
pub use pairings::{multi_miller_loop, pairing, G2Prepared, Gt, MillerLoopResult, PairingBatch};
pub use scalar::Scalar;

/// |x| for the curve parameter x = -0xd201000000010000
const BLS_X: u64 = 0xd201_0000_0001_0000;
const BLS_X_IS_NEGATIVE: bool = true;

/// Size of a compressed G1 point
pub const G1_COMPRESSED_SIZE: usize = 48;
/// Size of a compressed G2 point
pub const G2_COMPRESSED_SIZE: usize = 96;

/// Explain why compressed bytes with the leading byte `flags` failed to
/// decode. The flag bits are compression (7), infinity (6) and sign (5).
fn compressed_rejection(flags: u8) -> &'static str {
    if flags & 0x80 == 0 {
        "compression flag not set"
    } else if flags & 0x40 != 0 {
        "malformed point at infinity"
    } else {
        "coordinate not canonical or not on the curve"
    }
}

/// Leading-byte flags of a compressed encoding: compression always set,
/// infinity for the identity, sign when y is the larger root.
fn compression_flags(infinity: subtle::Choice, y_larger: subtle::Choice) -> u8 {
    use subtle::ConditionallySelectable;

    let mut flags = 0x80;
    flags |= u8::conditional_select(&0, &0x40, infinity);
    flags |= u8::conditional_select(&0, &0x20, (!infinity) & y_larger);
    flags
}
