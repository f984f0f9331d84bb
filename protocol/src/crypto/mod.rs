//! # Cryptographic Primitives
//!
//! Only hashing is needed: blocks are linked by SHA-256 content hashes.
//! Transactions carry no signatures, so there is no signing code here.

pub mod hash;

pub use hash::{sha256_array, sha256_hex};
