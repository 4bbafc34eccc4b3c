//! Error kinds surfaced by the public API

use alloc::string::String;

/// Primary error type for BLS operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A compressed G1 or G2 encoding was malformed, off the curve or
    /// outside the prime-order subgroup
    InvalidPointEncoding {
        /// Where the encoding was rejected
        context: &'static str,
        /// Human readable reason
        message: String,
    },

    /// A signature failed to decode
    InvalidSignatureEncoding {
        /// Where the encoding was rejected
        context: &'static str,
        /// Human readable reason
        message: String,
    },

    /// A well-formed signature did not verify
    InvalidSignature {
        /// Operation that rejected the signature
        context: &'static str,
    },

    /// Inversion of zero
    NotInvertible {
        /// Operation that attempted the inversion
        context: &'static str,
    },

    /// An operation that needs at least one input received none
    EmptyInput {
        /// Operation that received no input
        context: &'static str,
    },

    /// Parallel inputs had different lengths
    LengthMismatch {
        /// Operation that compared the inputs
        context: &'static str,
        /// Length of the first input
        expected: usize,
        /// Length of the second input
        actual: usize,
    },

    /// Seed material was too short for key generation
    InvalidSeed {
        /// Minimum accepted seed length
        min: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// A private key was zero, not below the group order, or unparseable
    InvalidPrivateKey {
        /// Where the key was rejected
        context: &'static str,
        /// Human readable reason
        message: String,
    },

    /// A fixed-size byte input had the wrong length
    InvalidLength {
        /// Where the length was checked
        context: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// A parameter was outside its accepted range
    InvalidParameter {
        /// Name of the parameter
        context: &'static str,
        /// Human readable reason
        message: String,
    },

    /// Anything else
    Other {
        /// Where the failure happened
        context: &'static str,
        /// Human readable reason
        message: String,
    },
}

/// Result type for BLS operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidPointEncoding { message, .. } => {
                Self::InvalidPointEncoding { context, message }
            }
            Self::InvalidSignatureEncoding { message, .. } => {
                Self::InvalidSignatureEncoding { context, message }
            }
            Self::InvalidSignature { .. } => Self::InvalidSignature { context },
            Self::NotInvertible { .. } => Self::NotInvertible { context },
            Self::EmptyInput { .. } => Self::EmptyInput { context },
            Self::LengthMismatch {
                expected, actual, ..
            } => Self::LengthMismatch {
                context,
                expected,
                actual,
            },
            Self::InvalidSeed { min, actual } => Self::InvalidSeed { min, actual },
            Self::InvalidPrivateKey { message, .. } => Self::InvalidPrivateKey { context, message },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Replace the message of an existing error. Kinds without a message
    /// are returned unchanged.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidPointEncoding { context, .. } => {
                Self::InvalidPointEncoding { context, message }
            }
            Self::InvalidSignatureEncoding { context, .. } => {
                Self::InvalidSignatureEncoding { context, message }
            }
            Self::InvalidPrivateKey { context, .. } => Self::InvalidPrivateKey { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::Other { context, .. } => Self::Other { context, message },
            other => other,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPointEncoding { context, message } => {
                write!(f, "Invalid point encoding: {}: {}", context, message)
            }
            Self::InvalidSignatureEncoding { context, message } => {
                write!(f, "Invalid signature encoding: {}: {}", context, message)
            }
            Self::InvalidSignature { context } => {
                write!(f, "Invalid signature: {}", context)
            }
            Self::NotInvertible { context } => {
                write!(f, "{}: element is not invertible", context)
            }
            Self::EmptyInput { context } => {
                write!(f, "{}: empty input", context)
            }
            Self::LengthMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: length mismatch ({} vs {})",
                    context, expected, actual
                )
            }
            Self::InvalidSeed { min, actual } => {
                write!(
                    f,
                    "Invalid seed: at least {} bytes required, got {}",
                    min, actual
                )
            }
            Self::InvalidPrivateKey { context, message } => {
                write!(f, "Invalid private key: {}: {}", context, message)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}
