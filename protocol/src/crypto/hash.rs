//! # Hashing Utilities
//!
//! SHA-256 helpers used for block content hashes. Everything that ends up in
//! a block hash goes through [`sha256_hex`], so the digest and its text
//! encoding are decided in one place.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-256 hash and encode it as lowercase hex.
///
/// # Example
///
/// ```
/// use linkchain_protocol::crypto::sha256_hex;
///
/// let hash = sha256_hex(b"");
/// assert_eq!(
///     hash,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256_array(data))
}
