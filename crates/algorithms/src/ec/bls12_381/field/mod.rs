//! Field tower `Fp -> Fp2 -> Fp6 -> Fp12`.

pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp6;
