//! Core type definitions for ledger transactions.
//!
//! From the chain's point of view a transaction is opaque payload: it is
//! stored, ordered, and hashed, but never interpreted. There are no balance
//! checks and no uniqueness rules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A single transfer record: who sent how much to whom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender identifier.
    pub sender: String,
    /// Recipient identifier.
    pub recipient: String,
    /// Transferred amount.
    pub amount: f64,
}

impl Transaction {
    /// Build a transaction from anything string-like.
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Append this transaction's canonical bytes to `buf`.
    ///
    /// Layout: `str(sender) || str(recipient) || u64_le(amount.to_bits())`,
    /// where `str(s) = u64_le(len) || utf8`. The length prefixes keep
    /// `("ab", "c")` and `("a", "bc")` apart; `to_bits` pins the float
    /// encoding exactly, so `0.0` and `-0.0` hash differently.
    pub fn write_canonical(&self, buf: &mut Vec<u8>) {
        write_str(buf, &self.sender);
        write_str(buf, &self.recipient);
        buf.extend_from_slice(&self.amount.to_bits().to_le_bytes());
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.sender, self.recipient, self.amount)
    }
}

/// Length-prefixed UTF-8 string, the building block of the canonical encoding.
pub(crate) fn write_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
