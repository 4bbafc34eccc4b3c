//! Byte-level helpers shared by the augbls crates.
//!
//! Nothing here is part of the public API.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod constant_time;
pub mod endian;
