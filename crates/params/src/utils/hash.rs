//! Constants for hash functions

/// Output size of SHA-256 in bytes
pub const SHA256_OUTPUT_SIZE: usize = 32;

/// Internal block size of SHA-256 in bytes
pub const SHA256_BLOCK_SIZE: usize = 64;

/// Length in bytes of a key fingerprint, a SHA-256 prefix
pub const FINGERPRINT_SIZE: usize = 4;
