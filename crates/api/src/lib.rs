//! Public API surface of the augbls workspace.
//!
//! This crate holds the error kinds every layer converts into and the
//! signature traits the BLS scheme implements. It carries no arithmetic.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod traits;

pub use error::{Error, Result, ResultExt};
pub use traits::{AggregateSignature, Signature, SignatureDerive, SignatureSerialize};

// Re-export trait modules for direct access
pub use traits::signature;
