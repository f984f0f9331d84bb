//! In-memory, append-only chain of hash-linked blocks.
//!
//! ## Concurrency
//!
//! The block sequence sits behind a single `parking_lot::RwLock`.
//!
//! - [`Chain::append`] holds the write lock for the whole
//!   read-tip → build block → push sequence. Two appends can never observe
//!   the same tip, so the chain cannot fork.
//! - Readers take the read lock just long enough to clone the `Arc`s.
//!   Blocks are immutable once built, so a snapshot never contains a
//!   half-written block, and iterating it does not hold up writers.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::block::Block;
use crate::config::{GENESIS_INDEX, GENESIS_PREVIOUS_HASH};
use crate::error::{ChainError, Result};
use crate::transaction::Transaction;

/// Ordered, append-only sequence of blocks rooted at genesis.
///
/// Share it across threads with `Arc<Chain>`; every method takes `&self`.
#[derive(Debug)]
pub struct Chain {
    blocks: RwLock<Vec<Arc<Block>>>,
}

impl Chain {
    /// Create a chain holding only a fresh genesis block.
    pub fn new() -> Self {
        let genesis = Block::genesis();
        info!(hash = %genesis.hash(), "chain initialized with genesis block");
        Chain {
            blocks: RwLock::new(vec![Arc::new(genesis)]),
        }
    }

    /// Rebuild a chain from previously exported blocks.
    ///
    /// The blocks must form a valid chain on their own: genesis first,
    /// consecutive indices, intact links, and hashes that match content.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        let blocks: Vec<Arc<Block>> = blocks.into_iter().map(Arc::new).collect();
        verify_sequence(&blocks)?;
        info!(len = blocks.len(), "chain rebuilt from exported blocks");
        Ok(Chain {
            blocks: RwLock::new(blocks),
        })
    }

    /// Seal `transactions` into a new block on top of the current tip.
    ///
    /// Never fails. The returned handle is the block exactly as stored.
    pub fn append(&self, transactions: Vec<Transaction>) -> Arc<Block> {
        let mut blocks = self.blocks.write();
        let (index, previous_hash) = match blocks.last() {
            Some(tip) => (tip.index() + 1, tip.hash().to_string()),
            // Unreachable through the public API; every constructor seeds genesis.
            None => (GENESIS_INDEX, GENESIS_PREVIOUS_HASH.to_string()),
        };

        let block = Arc::new(Block::new(index, transactions, previous_hash));
        blocks.push(Arc::clone(&block));
        drop(blocks);

        debug!(
            index = block.index(),
            hash = %block.hash(),
            tx_count = block.tx_count(),
            "block appended"
        );
        block
    }

    /// Snapshot of every block, genesis first.
    pub fn traverse(&self) -> Vec<Arc<Block>> {
        self.blocks.read().clone()
    }

    /// Iterate over a snapshot taken at call time.
    ///
    /// Blocks appended while iterating are not visited.
    pub fn iter(&self) -> impl Iterator<Item = Arc<Block>> {
        self.traverse().into_iter()
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    /// Always `false`: a chain holds at least its genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }

    /// The most recently appended block.
    pub fn tip(&self) -> Arc<Block> {
        let blocks = self.blocks.read();
        match blocks.last() {
            Some(block) => Arc::clone(block),
            None => unreachable!("chain always holds a genesis block"),
        }
    }

    pub fn genesis(&self) -> Arc<Block> {
        let blocks = self.blocks.read();
        match blocks.first() {
            Some(block) => Arc::clone(block),
            None => unreachable!("chain always holds a genesis block"),
        }
    }

    /// Block at `index`, if the chain is that long.
    pub fn get(&self, index: u64) -> Option<Arc<Block>> {
        let position = usize::try_from(index).ok()?;
        self.blocks.read().get(position).cloned()
    }

    /// Audit the whole chain: genesis shape, every block's hash, index
    /// continuity, and parent links.
    pub fn verify(&self) -> Result<()> {
        let snapshot = self.traverse();
        if let Err(err) = verify_sequence(&snapshot) {
            warn!(error = %err, len = snapshot.len(), "chain integrity check failed");
            return Err(err);
        }
        Ok(())
    }

    /// Pretty-printed JSON array of every block, genesis first.
    ///
    /// Fails with [`ChainError::NonFiniteAmount`] if any amount is NaN or
    /// infinite: JSON would write it as `null` and the export could not be
    /// read back.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.traverse();
        for block in &snapshot {
            if let Some((position, tx)) = block
                .transactions()
                .iter()
                .enumerate()
                .find(|(_, tx)| !tx.amount.is_finite())
            {
                return Err(ChainError::NonFiniteAmount {
                    index: block.index(),
                    position,
                    amount: tx.amount,
                });
            }
        }
        let blocks: Vec<&Block> = snapshot.iter().map(Arc::as_ref).collect();
        Ok(serde_json::to_string_pretty(&blocks)?)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

fn verify_sequence(blocks: &[Arc<Block>]) -> Result<()> {
    let genesis = blocks.first().ok_or(ChainError::Empty)?;
    if !genesis.is_genesis() {
        return Err(ChainError::InvalidGenesis(format!(
            "first block has index {}, expected {}",
            genesis.index(),
            GENESIS_INDEX
        )));
    }
    genesis.verify()?;

    for (position, pair) in blocks.windows(2).enumerate() {
        let (parent, block) = (&pair[0], &pair[1]);
        let expected = parent.index() + 1;
        if block.index() != expected {
            return Err(ChainError::IndexGap {
                position: position + 1,
                expected,
                found: block.index(),
            });
        }
        if block.previous_hash() != parent.hash() {
            return Err(ChainError::BrokenLink {
                index: block.index(),
                expected: parent.hash().to_string(),
                found: block.previous_hash().to_string(),
            });
        }
        block.verify()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn batch(n: usize) -> Vec<Transaction> {
        (0..n)
            .map(|i| Transaction::new(format!("sender-{i}"), format!("recipient-{i}"), i as f64))
            .collect()
    }

    fn exported(chain: &Chain) -> Vec<Block> {
        chain.traverse().iter().map(|b| Block::clone(b)).collect()
    }

    #[test]
    fn new_chain_holds_only_genesis() {
        let chain = Chain::new();
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());

        let genesis = chain.genesis();
        assert_eq!(genesis.index(), 0);
        assert_eq!(genesis.previous_hash(), "");
        assert!(genesis.transactions().is_empty());
        assert_eq!(chain.tip().hash(), genesis.hash());
    }

    #[test]
    fn append_links_to_tip() {
        let chain = Chain::new();
        let genesis_hash = chain.tip().hash().to_string();

        let block = chain.append(batch(2));
        assert_eq!(block.index(), 1);
        assert_eq!(block.previous_hash(), genesis_hash);
        assert_eq!(block.tx_count(), 2);
        assert_eq!(chain.tip().hash(), block.hash());
    }

    #[test]
    fn empty_batches_are_accepted() {
        let chain = Chain::new();
        chain.append(Vec::new());
        chain.append(Vec::new());
        assert_eq!(chain.len(), 3);
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn get_by_index() {
        let chain = Chain::new();
        chain.append(batch(1));
        chain.append(batch(3));

        assert_eq!(chain.get(2).map(|b| b.tx_count()), Some(3));
        assert!(chain.get(3).is_none());
    }

    #[test]
    fn iter_visits_in_order() {
        let chain = Chain::new();
        for n in 0..5 {
            chain.append(batch(n));
        }
        let indices: Vec<u64> = chain.iter().map(|b| b.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn snapshot_is_stable_across_appends() {
        let chain = Chain::new();
        chain.append(batch(1));
        let snapshot = chain.traverse();
        chain.append(batch(1));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn verify_accepts_appended_chain() {
        let chain = Chain::new();
        for n in 1..10 {
            chain.append(batch(n));
        }
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn from_blocks_round_trip() {
        let chain = Chain::new();
        chain.append(batch(2));
        chain.append(batch(1));

        let rebuilt = Chain::from_blocks(exported(&chain)).expect("valid chain");
        assert_eq!(rebuilt.len(), 3);
        assert_eq!(rebuilt.tip().hash(), chain.tip().hash());

        let next = rebuilt.append(batch(1));
        assert_eq!(next.index(), 3);
        assert_eq!(next.previous_hash(), chain.tip().hash());
    }

    #[test]
    fn from_blocks_rejects_empty() {
        assert!(matches!(Chain::from_blocks(Vec::new()), Err(ChainError::Empty)));
    }

    #[test]
    fn from_blocks_rejects_missing_genesis() {
        let chain = Chain::new();
        chain.append(batch(1));
        let mut blocks = exported(&chain);
        blocks.remove(0);

        assert!(matches!(
            Chain::from_blocks(blocks),
            Err(ChainError::InvalidGenesis(_))
        ));
    }

    #[test]
    fn from_blocks_rejects_broken_link() {
        let chain = Chain::new();
        chain.append(batch(1));
        let mut blocks = exported(&chain);
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        blocks.push(Block::with_timestamp(2, ts, batch(1), "00".repeat(32)));

        assert!(matches!(
            Chain::from_blocks(blocks),
            Err(ChainError::BrokenLink { index: 2, .. })
        ));
    }

    #[test]
    fn from_blocks_rejects_index_gap() {
        let chain = Chain::new();
        chain.append(batch(1));
        let mut blocks = exported(&chain);
        let tip_hash = blocks[1].hash().to_string();
        blocks.push(Block::new(5, batch(1), tip_hash));

        assert!(matches!(
            Chain::from_blocks(blocks),
            Err(ChainError::IndexGap {
                position: 2,
                expected: 2,
                found: 5
            })
        ));
    }

    #[test]
    fn to_json_lists_every_block() {
        let chain = Chain::new();
        chain.append(vec![Transaction::new("Alice", "Bob", 10.0)]);

        let json = chain.to_json().expect("export");
        let blocks: Vec<Block> = serde_json::from_str(&json).expect("parse");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].transactions()[0].sender, "Alice");
        assert!(Chain::from_blocks(blocks).is_ok());
    }

    #[test]
    fn to_json_rejects_non_finite_amounts() {
        let chain = Chain::new();
        chain.append(vec![Transaction::new("a", "b", 1.0)]);
        chain.append(vec![
            Transaction::new("a", "b", 2.0),
            Transaction::new("a", "b", f64::NAN),
        ]);

        // The chain itself is fine; only the JSON export is impossible.
        assert!(chain.verify().is_ok());
        assert!(matches!(
            chain.to_json(),
            Err(ChainError::NonFiniteAmount {
                index: 2,
                position: 1,
                ..
            })
        ));
    }
}
