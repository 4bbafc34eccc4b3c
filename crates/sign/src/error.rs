//! Error types for the signature crate

use augbls_algorithms::Error as AlgoError;
use thiserror::Error;

/// Errors raised by key handling, signing, aggregation and derivation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A public key failed to decode
    #[error("invalid public key encoding: {0}")]
    InvalidPublicKey(&'static str),

    /// A signature failed to decode
    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(&'static str),

    /// A private key was zero, not below the group order, or unparseable
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(&'static str),

    /// A fixed-size input had the wrong length
    #[error("invalid length for {context}: expected {expected}, got {actual}")]
    InvalidLength {
        /// What was being decoded
        context: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// KeyGen seed below the minimum length
    #[error("seed must be at least {min} bytes, got {actual}")]
    InvalidSeed {
        /// Minimum accepted seed length
        min: usize,
        /// Supplied seed length
        actual: usize,
    },

    /// An operation that needs at least one input received none
    #[error("{0}: empty input")]
    EmptyInput(&'static str),

    /// Public keys and messages of an aggregate differ in count
    #[error("{context}: {public_keys} public keys but {messages} messages")]
    LengthMismatch {
        /// Operation that compared the inputs
        context: &'static str,
        /// Number of public keys
        public_keys: usize,
        /// Number of messages
        messages: usize,
    },

    /// Hex text could not be decoded
    #[error("invalid hex: {0}")]
    Hex(String),

    /// A well-formed signature did not verify
    #[error("signature verification failed")]
    Verification,

    /// Failure inside the curve layer that has no more specific kind
    #[error("primitive failure: {0}")]
    Primitive(AlgoError),
}

/// Result type for the signature crate
pub type Result<T> = core::result::Result<T, Error>;

impl From<AlgoError> for Error {
    fn from(err: AlgoError) -> Self {
        match err {
            AlgoError::PointEncoding {
                group: "G1",
                reason,
            } => Error::InvalidPublicKey(reason),
            AlgoError::PointEncoding {
                group: "G2",
                reason,
            } => Error::InvalidSignatureEncoding(reason),
            AlgoError::Length {
                context,
                expected,
                actual,
            } => Error::InvalidLength {
                context,
                expected,
                actual,
            },
            other => Error::Primitive(other),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Hex(err.to_string())
    }
}

impl From<Error> for augbls_api::Error {
    fn from(err: Error) -> Self {
        use augbls_api::Error as ApiError;

        match err {
            Error::InvalidPublicKey(reason) => ApiError::InvalidPointEncoding {
                context: "public key",
                message: reason.into(),
            },
            Error::InvalidSignatureEncoding(reason) => ApiError::InvalidSignatureEncoding {
                context: "signature",
                message: reason.into(),
            },
            Error::InvalidPrivateKey(reason) => ApiError::InvalidPrivateKey {
                context: "private key",
                message: reason.into(),
            },
            Error::InvalidLength {
                context,
                expected,
                actual,
            } => ApiError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::InvalidSeed { min, actual } => ApiError::InvalidSeed { min, actual },
            Error::EmptyInput(context) => ApiError::EmptyInput { context },
            Error::LengthMismatch {
                context,
                public_keys,
                messages,
            } => ApiError::LengthMismatch {
                context,
                expected: public_keys,
                actual: messages,
            },
            Error::Hex(e) => ApiError::InvalidParameter {
                context: "hex",
                message: e,
            },
            Error::Verification => ApiError::InvalidSignature {
                context: "AugSchemeMPL",
            },
            Error::Primitive(e) => e.into(),
        }
    }
}
