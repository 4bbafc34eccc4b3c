//! Constants for pairing-based signatures

pub mod bls;
