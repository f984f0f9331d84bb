//! # Block Structure
//!
//! A block is one batch of transactions sealed with a content hash. Each
//! block names its predecessor's hash, so rewriting any block breaks every
//! link after it.
//!
//! ## Block Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  index: u64             (genesis = 0)       │
//! │  timestamp: DateTime<Utc>                   │
//! │  transactions: Vec<Transaction>             │
//! │  previous_hash: String  ("" for genesis)    │
//! │  hash: String           (SHA-256, hex)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The hash covers every other field, encoded canonically:
//!
//! ```text
//! u64_le(index)
//! || str(timestamp, RFC 3339, nanoseconds, "Z")
//! || u64_le(tx_count) || tx_0 || tx_1 || ...
//! || str(previous_hash)
//!
//! str(s) = u64_le(len(s)) || utf8(s)
//! tx     = str(sender) || str(recipient) || u64_le(amount.to_bits())
//! ```
//!
//! The timestamp is part of the preimage. Two blocks with the same index,
//! transactions, and parent built at different instants hash differently.
//! This binds a block to its creation moment; it is not a pure hash of the
//! transaction content, and it does not stop someone who controls the clock
//! from replaying a batch.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{GENESIS_INDEX, GENESIS_PREVIOUS_HASH};
use crate::crypto::sha256_hex;
use crate::error::{ChainError, Result};
use crate::transaction::types::write_str;
use crate::transaction::Transaction;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A sealed batch of transactions.
///
/// Fields are private: the hash is set once, in the constructor, and there
/// is no way to change any field afterwards. Blocks deserialized from an
/// export are the exception, which is what [`Block::verify`] is for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: DateTime<Utc>,
    transactions: Vec<Transaction>,
    previous_hash: String,
    hash: String,
}

impl Block {
    /// Build a block stamped with the current time.
    ///
    /// `index` and `previous_hash` are taken as given; keeping them
    /// consistent with the predecessor is the chain's job.
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: String) -> Self {
        Self::with_timestamp(index, Utc::now(), transactions, previous_hash)
    }

    /// Build a block with a caller-supplied timestamp.
    ///
    /// Identical inputs always produce the identical hash.
    pub fn with_timestamp(
        index: u64,
        timestamp: DateTime<Utc>,
        transactions: Vec<Transaction>,
        previous_hash: String,
    ) -> Self {
        let hash = compute_block_hash(index, &timestamp, &transactions, &previous_hash);
        Block {
            index,
            timestamp,
            transactions,
            previous_hash,
            hash,
        }
    }

    /// Construct a genesis block: index 0, no transactions, no parent.
    pub fn genesis() -> Self {
        Self::new(GENESIS_INDEX, Vec::new(), GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Recompute the hash from the block's current fields.
    pub fn compute_hash(&self) -> String {
        compute_block_hash(
            self.index,
            &self.timestamp,
            &self.transactions,
            &self.previous_hash,
        )
    }

    /// Check that the stored hash matches the content, and that a block at
    /// index 0 has the genesis shape.
    ///
    /// Linkage to neighbours is not checked here; see
    /// [`Chain::verify`](super::chain::Chain::verify).
    pub fn verify(&self) -> Result<()> {
        let computed = self.compute_hash();
        if self.hash != computed {
            return Err(ChainError::HashMismatch {
                index: self.index,
                stored: self.hash.clone(),
                computed,
            });
        }

        if self.is_genesis() {
            if self.previous_hash != GENESIS_PREVIOUS_HASH {
                return Err(ChainError::InvalidGenesis(format!(
                    "previous hash must be empty, found {}",
                    self.previous_hash
                )));
            }
            if !self.transactions.is_empty() {
                return Err(ChainError::InvalidGenesis(format!(
                    "genesis must not carry transactions, found {}",
                    self.transactions.len()
                )));
            }
        }

        Ok(())
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// Lowercase hex SHA-256 of the block's canonical encoding.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_genesis(&self) -> bool {
        self.index == GENESIS_INDEX
    }
}

// ---------------------------------------------------------------------------
// Hash Computation
// ---------------------------------------------------------------------------

/// Timestamp text used in the preimage. Fixed at nanosecond precision with a
/// `Z` suffix so the same instant always renders the same way.
fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn compute_block_hash(
    index: u64,
    timestamp: &DateTime<Utc>,
    transactions: &[Transaction],
    previous_hash: &str,
) -> String {
    let mut preimage = Vec::with_capacity(128 + transactions.len() * 48);
    preimage.extend_from_slice(&index.to_le_bytes());
    write_str(&mut preimage, &canonical_timestamp(timestamp));
    preimage.extend_from_slice(&(transactions.len() as u64).to_le_bytes());
    for tx in transactions {
        tx.write_canonical(&mut preimage);
    }
    write_str(&mut preimage, previous_hash);
    sha256_hex(&preimage)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HASH_HEX_LENGTH;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn sample_txs() -> Vec<Transaction> {
        vec![
            Transaction::new("Alice", "Bob", 10.0),
            Transaction::new("Bob", "Charlie", 5.0),
        ]
    }

    fn sample_block() -> Block {
        Block::with_timestamp(1, fixed_time(), sample_txs(), "ab".repeat(32))
    }

    #[test]
    fn genesis_block_properties() {
        let genesis = Block::genesis();
        assert_eq!(genesis.index(), 0);
        assert_eq!(genesis.previous_hash(), "");
        assert!(genesis.transactions().is_empty());
        assert!(genesis.is_genesis());
        assert!(genesis.verify().is_ok());
    }

    #[test]
    fn hash_is_lowercase_hex() {
        let block = sample_block();
        assert_eq!(block.hash().len(), HASH_HEX_LENGTH);
        assert!(block
            .hash()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn hash_is_deterministic() {
        let a = sample_block();
        let b = sample_block();
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), a.compute_hash());
    }

    #[test]
    fn hash_changes_with_index() {
        let base = sample_block();
        let other = Block::with_timestamp(2, fixed_time(), sample_txs(), "ab".repeat(32));
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn hash_changes_with_amount() {
        let base = sample_block();
        let mut txs = sample_txs();
        txs[1].amount = 5.000001;
        let other = Block::with_timestamp(1, fixed_time(), txs, "ab".repeat(32));
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn hash_changes_with_previous_hash() {
        let base = sample_block();
        let other = Block::with_timestamp(1, fixed_time(), sample_txs(), "cd".repeat(32));
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn hash_changes_with_timestamp() {
        let base = sample_block();
        let later = fixed_time() + chrono::Duration::nanoseconds(1);
        let other = Block::with_timestamp(1, later, sample_txs(), "ab".repeat(32));
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn hash_is_order_sensitive() {
        let base = sample_block();
        let mut reversed = sample_txs();
        reversed.reverse();
        let other = Block::with_timestamp(1, fixed_time(), reversed, "ab".repeat(32));
        assert_ne!(base.hash(), other.hash());
    }

    #[test]
    fn tampered_hash_fails_verification() {
        let mut block = sample_block();
        block.hash = "00".repeat(32);
        assert!(matches!(
            block.verify(),
            Err(ChainError::HashMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn tampered_transaction_fails_verification() {
        let mut block = sample_block();
        block.transactions[0].amount = 1_000_000.0;
        assert!(matches!(block.verify(), Err(ChainError::HashMismatch { .. })));
    }

    #[test]
    fn genesis_with_parent_is_rejected() {
        let block = Block::with_timestamp(0, fixed_time(), Vec::new(), "ff".repeat(32));
        assert!(matches!(block.verify(), Err(ChainError::InvalidGenesis(_))));
    }

    #[test]
    fn genesis_with_transactions_is_rejected() {
        let block = Block::with_timestamp(0, fixed_time(), sample_txs(), String::new());
        assert!(matches!(block.verify(), Err(ChainError::InvalidGenesis(_))));
    }

    #[test]
    fn empty_block_is_valid() {
        let block = Block::new(7, Vec::new(), "ab".repeat(32));
        assert_eq!(block.tx_count(), 0);
        assert!(block.verify().is_ok());
    }

    #[test]
    fn canonical_timestamp_keeps_nanoseconds() {
        let ts = fixed_time() + chrono::Duration::nanoseconds(42);
        assert_eq!(canonical_timestamp(&ts), "2024-03-01T12:00:00.000000042Z");
    }

    #[test]
    fn json_round_trip_preserves_hash() {
        let block = Block::new(3, sample_txs(), "ab".repeat(32));
        let json = serde_json::to_string(&block).expect("serialize");
        let recovered: Block = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(block, recovered);
        assert!(recovered.verify().is_ok());
    }
}
