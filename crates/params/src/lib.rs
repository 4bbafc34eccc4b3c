//! Constant values for the augbls workspace
//!
//! Byte sizes, domain separation tags, salts and derivation path prefixes
//! shared by the signature layer and its tests.

#![no_std]

pub mod traditional;
pub mod utils;
