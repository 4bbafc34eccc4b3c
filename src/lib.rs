//! # augbls
//!
//! Augmented BLS signatures over BLS12-381.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! augbls = "0.1"
//! ```
//!
//! ```
//! use augbls::prelude::*;
//!
//! let sk = AugSchemeMpl::key_gen(&[0u8; 32]).unwrap();
//! let sig = AugSchemeMpl::sign(&sk, b"hello").unwrap();
//! assert!(AugSchemeMpl::verify(&sk.public_key(), b"hello", &sig));
//! ```
//!
//! ## Features
//!
//! - `sign` (default): the scheme, key derivation and mnemonic seeds
//! - `algorithms`: raw field, group, pairing and hash-to-curve arithmetic
//! - `serde`: hex-string `Serialize`/`Deserialize` for keys and signatures
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from its
//! sub-crates:
//!
//! - [`augbls-algorithms`]: BLS12-381 arithmetic
//! - [`augbls-sign`]: the signature scheme

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use augbls_api as api;
pub use augbls_internal as internal;
pub use augbls_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use augbls_algorithms as algorithms;

#[cfg(feature = "sign")]
pub use augbls_sign as sign;

// Workspace dependencies that appear in public signatures
#[cfg(feature = "sign")]
pub use rand;
pub use subtle;
pub use zeroize;

/// Common imports for augbls users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{AggregateSignature, Signature, SignatureDerive, SignatureSerialize};

    #[cfg(feature = "sign")]
    pub use crate::sign::bls::derive;

    #[cfg(feature = "sign")]
    pub use crate::sign::{AugSchemeMpl, PrivateKey, PublicKey, Signature as BlsSignature};
}
