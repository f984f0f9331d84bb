//! # Storage Module
//!
//! The ledger's data structures. Everything lives in memory; nothing is
//! written to disk.
//!
//! ## Architecture
//!
//! ```text
//! block.rs  — Block structure, genesis block, canonical hash, verification
//! chain.rs  — Append-only chain with locking, traversal, integrity audit
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Transaction> → Chain::append → Block::new → push under write lock
//!                                                        ↓
//!                              Chain::traverse → Vec<Arc<Block>> snapshot
//! ```

pub mod block;
pub mod chain;

pub use block::Block;
pub use chain::Chain;
