//! Pairing-friendly curve primitives for the augbls workspace
//!
//! This crate provides constant-time BLS12-381 arithmetic: the prime field
//! and its extension tower, the G1 and G2 groups with their compressed
//! encodings, the optimal ate pairing and RFC 9380 hashing to G2.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Elliptic curve primitives
pub mod ec;
pub use ec::bls12_381;
