// Copyright (c) 2026 Linkchain Contributors. MIT License.
// See LICENSE for details.

//! # Linkchain — Core Library
//!
//! An in-memory, append-only ledger of transaction batches. Each block
//! carries the SHA-256 hash of its predecessor, so any edit to history
//! shows up as a broken link.
//!
//! ## Architecture
//!
//! - **transaction** — The opaque payload: sender, recipient, amount.
//! - **storage** — [`Block`] construction and hashing, and the [`Chain`]
//!   that appends blocks atomically under concurrent writers.
//! - **crypto** — SHA-256 helpers.
//! - **error** — Errors raised by integrity audits and export/import.
//! - **config** — Protocol constants.
//!
//! ## Example
//!
//! ```
//! use linkchain_protocol::{Chain, Transaction};
//!
//! let chain = Chain::new();
//! chain.append(vec![
//!     Transaction::new("Alice", "Bob", 10.0),
//!     Transaction::new("Bob", "Charlie", 5.0),
//! ]);
//! chain.append(vec![Transaction::new("Charlie", "David", 2.0)]);
//!
//! let blocks = chain.traverse();
//! assert_eq!(blocks.len(), 3);
//! assert_eq!(blocks[2].previous_hash(), blocks[1].hash());
//! assert!(chain.verify().is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;
pub mod transaction;

pub use error::{ChainError, Result};
pub use storage::{Block, Chain};
pub use transaction::Transaction;
