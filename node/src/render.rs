//! Human-readable and JSON rendering of chain snapshots.
//!
//! The pretty form prints one paragraph per block: index, timestamp,
//! transactions, previous hash, and hash, followed by a blank line.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use anyhow::{Context, Result};
use linkchain_protocol::{Block, Chain};

use crate::cli::OutputFormat;

/// Render every block of `chain` in the requested format.
pub fn render_chain(chain: &Chain, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            render_blocks(&chain.traverse()).context("failed to format chain")
        }
        OutputFormat::Json => chain.to_json().context("failed to export chain as JSON"),
    }
}

pub fn render_blocks(blocks: &[Arc<Block>]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for block in blocks {
        render_block(&mut out, block)?;
        writeln!(out)?;
    }
    Ok(out)
}

fn render_block(out: &mut impl fmt::Write, block: &Block) -> fmt::Result {
    writeln!(out, "Index: {}", block.index())?;
    writeln!(out, "Timestamp: {}", block.timestamp().to_rfc3339())?;
    let txs: Vec<String> = block.transactions().iter().map(|tx| tx.to_string()).collect();
    writeln!(out, "Transactions: [{}]", txs.join(", "))?;
    writeln!(out, "Previous Hash: {}", block.previous_hash())?;
    writeln!(out, "Hash: {}", block.hash())
}
