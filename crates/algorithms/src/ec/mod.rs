//! Elliptic curve primitives
//!
//! Only the pairing-friendly curve BLS12-381 is provided.

pub mod bls12_381;

pub use bls12_381::{
    G1Affine as Bls12_381G1Affine, G1Projective as Bls12_381G1, G2Affine as Bls12_381G2Affine,
    G2Projective as Bls12_381G2, Gt as Bls12_381Gt, Scalar as Bls12_381Scalar,
};
