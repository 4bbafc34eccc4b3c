//! Cross-module tests for the curve: group laws, pairing properties and the
//! compressed encodings.

mod serialization;
