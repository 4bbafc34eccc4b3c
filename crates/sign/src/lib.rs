//! Augmented BLS signatures over BLS12-381
//!
//! [`AugSchemeMpl`] signs `pk || message` on G2 and verifies with a single
//! pairing product check. Keys are derived from seeds with KeyGen, from
//! parent keys along hardened or unhardened paths, or from mnemonic
//! phrases; see [`bls::derive`].
//!
//! The scheme also implements the workspace signature traits from
//! `augbls-api`, so it can be driven through
//! [`augbls_api::Signature`] and [`augbls_api::AggregateSignature`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bls;
pub mod error;

pub use bls::{AugSchemeMpl, PrivateKey, PublicKey, Signature};
pub use error::{Error, Result};
