//! # Transaction Module
//!
//! The payload carried by blocks. A [`Transaction`] is a plain value: sender,
//! recipient, amount. Signatures and balance validation are out of scope;
//! the ledger only guarantees that once a batch is appended, nobody can
//! silently rewrite it.

pub mod types;

pub use types::Transaction;
