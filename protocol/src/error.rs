//! Error types for the ledger.
//!
//! Building, appending, and traversing never fail. [`ChainError`] covers the
//! paths that inspect a chain from the outside: integrity audits, exports,
//! and rebuilding a chain from previously exported blocks.

use thiserror::Error;

/// Failures reported by integrity checks and export/import.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A block's stored hash does not match the hash of its own fields.
    #[error("block {index} hash mismatch: stored={stored}, computed={computed}")]
    HashMismatch {
        /// Index of the offending block.
        index: u64,
        /// Hash recorded in the block.
        stored: String,
        /// Hash recomputed from the block's fields.
        computed: String,
    },

    /// A block does not reference its predecessor's hash.
    #[error("block {index} is not linked to its parent: expected previous hash {expected}, found {found}")]
    BrokenLink {
        /// Index of the offending block.
        index: u64,
        /// Hash of the preceding block.
        expected: String,
        /// Previous hash recorded in the block.
        found: String,
    },

    /// Block indices are not consecutive.
    #[error("index gap at position {position}: expected {expected}, found {found}")]
    IndexGap {
        /// Position of the block in the sequence.
        position: usize,
        /// Index the block should carry.
        expected: u64,
        /// Index the block actually carries.
        found: u64,
    },

    /// The first block does not have the genesis shape.
    #[error("invalid genesis block: {0}")]
    InvalidGenesis(String),

    /// JSON has no encoding for NaN or infinities, so a block holding one
    /// cannot be exported and read back.
    #[error("block {index} transaction {position} has a non-finite amount ({amount})")]
    NonFiniteAmount {
        /// Index of the offending block.
        index: u64,
        /// Position of the transaction within the block.
        position: usize,
        /// The amount itself.
        amount: f64,
    },

    /// A chain cannot be rebuilt from zero blocks.
    #[error("chain must contain at least the genesis block")]
    Empty,

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ChainError>;
