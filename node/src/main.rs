// Copyright (c) 2026 Linkchain Contributors. MIT License.
// See LICENSE for details.

//! # Linkchain Node
//!
//! Entry point for the `linkchain-node` binary. Parses CLI arguments,
//! initializes logging, and drives a chain through the public library API.
//!
//! The binary supports three subcommands:
//!
//! - `demo`    — append two sample batches and print the chain
//! - `stress`  — append from many threads at once and verify the result
//! - `version` — print build version information

mod cli;
mod logging;
mod render;

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;

use linkchain_protocol::{Chain, Transaction};

use cli::{Commands, LinkchainCli};

/// Participants used for generated stress-test transactions.
const STRESS_PARTICIPANTS: &[&str] = &["Alice", "Bob", "Charlie", "David", "Erin", "Frank"];

fn main() -> Result<()> {
    let cli = LinkchainCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format.into());

    match cli.command {
        Commands::Demo(args) => run_demo(args),
        Commands::Stress(args) => run_stress(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Appends the two sample batches to a fresh chain and prints it.
fn run_demo(args: cli::DemoArgs) -> Result<()> {
    let chain = Chain::new();

    chain.append(vec![
        Transaction::new("Alice", "Bob", 10.0),
        Transaction::new("Bob", "Charlie", 5.0),
    ]);
    chain.append(vec![Transaction::new("Charlie", "David", 2.0)]);

    chain.verify().context("demo chain failed its integrity check")?;
    tracing::info!(len = chain.len(), tip = %chain.tip().hash(), "demo chain built");

    print!("{}", render::render_chain(&chain, args.format)?);
    Ok(())
}

/// Hammers one chain from `args.writers` threads, then audits it.
fn run_stress(args: cli::StressArgs) -> Result<()> {
    anyhow::ensure!(args.writers > 0, "--writers must be at least 1");

    tracing::info!(
        writers = args.writers,
        batches = args.batches,
        txs = args.txs,
        "starting stress run"
    );

    let chain = Arc::new(Chain::new());
    let started = Instant::now();

    thread::scope(|s| {
        for writer in 0..args.writers {
            let chain = Arc::clone(&chain);
            let (batches, txs) = (args.batches, args.txs);
            s.spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..batches {
                    chain.append(random_batch(&mut rng, txs));
                }
                tracing::debug!(writer, batches, "writer finished");
            });
        }
    });

    let elapsed = started.elapsed();
    let expected = 1 + args.writers * args.batches;
    anyhow::ensure!(
        chain.len() == expected,
        "expected {} blocks after stress run, found {}",
        expected,
        chain.len()
    );
    chain.verify().context("stress chain failed its integrity check")?;

    tracing::info!(
        len = chain.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "stress run verified"
    );

    match args.dump {
        Some(format) => print!("{}", render::render_chain(&chain, format)?),
        None => {
            println!("blocks:  {}", chain.len());
            println!("tip:     {}", chain.tip().hash());
            println!("elapsed: {:?}", elapsed);
        }
    }
    Ok(())
}

fn random_batch<R: Rng>(rng: &mut R, size: usize) -> Vec<Transaction> {
    (0..size)
        .map(|_| {
            let mut pair = STRESS_PARTICIPANTS.choose_multiple(rng, 2);
            let sender = pair.next().copied().unwrap_or("Alice");
            let recipient = pair.next().copied().unwrap_or("Bob");
            let amount = (rng.gen_range(1..=10_000) as f64) / 100.0;
            Transaction::new(sender, recipient, amount)
        })
        .collect()
}

/// Prints build version information.
fn print_version() {
    println!("linkchain-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol {}", linkchain_protocol::config::PROTOCOL_VERSION);
    println!("hash     {}", linkchain_protocol::config::HASH_ALGORITHM);
}
