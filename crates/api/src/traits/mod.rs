//! Trait definitions implemented by the signature crates

pub mod signature;

pub use signature::{AggregateSignature, Signature, SignatureDerive, SignatureSerialize};
