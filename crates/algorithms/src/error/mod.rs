//! Error handling for the curve and pairing primitives

use alloc::borrow::Cow;
use alloc::format;
use core::fmt;

use augbls_api::Error as CoreError;

pub mod validate;


/// The error type for curve and pairing primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// A compressed point failed to decode
    PointEncoding {
        /// `"G1"` or `"G2"`
        group: &'static str,
        /// Which check rejected the bytes
        reason: &'static str,
    },

    /// Inversion of zero
    NotInvertible {
        /// Operation that attempted the inversion
        operation: &'static str,
    },

    /// Processing error during a cryptographic operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand to create a PointEncoding error
    pub fn encoding(group: &'static str, reason: &'static str) -> Self {
        Error::PointEncoding { group, reason }
    }
}

/// Result type for primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::PointEncoding { group, reason } => {
                write!(f, "Invalid {} point encoding: {}", group, reason)
            }
            Error::NotInvertible { operation } => {
                write!(f, "Zero is not invertible in {}", operation)
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: "parameter",
                message: format!("{}: {}", name, reason),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::PointEncoding { group, reason } => CoreError::InvalidPointEncoding {
                context: group,
                message: reason.into(),
            },
            Error::NotInvertible { operation } => CoreError::NotInvertible { context: operation },
            Error::Processing { operation, details } => CoreError::Other {
                context: operation,
                message: details.into(),
            },
        }
    }
}
