//! # Protocol Constants
//!
//! The handful of fixed values the ledger depends on. Anything that changes
//! how a block hashes lives here so there is exactly one place to look.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Protocol version string. Bump the major component whenever the canonical
/// hash encoding changes, since old hashes stop reproducing.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Index of the genesis block.
pub const GENESIS_INDEX: u64 = 0;

/// Previous-hash value carried by the genesis block. It has no predecessor,
/// so the link is the empty string.
pub const GENESIS_PREVIOUS_HASH: &str = "";

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Digest used for block content hashes.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Digest output length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Length of a hex-encoded block hash (two characters per byte).
pub const HASH_HEX_LENGTH: usize = HASH_OUTPUT_LENGTH * 2;
