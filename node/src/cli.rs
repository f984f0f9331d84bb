//! # CLI Interface
//!
//! Defines the command-line argument structure for `linkchain-node` using
//! `clap` derive. Supports three subcommands: `demo`, `stress`, and
//! `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Linkchain ledger harness.
///
/// Builds an in-memory hash-linked chain, appends transaction batches to it,
/// and prints the resulting blocks.
#[derive(Parser, Debug)]
#[command(
    name = "linkchain-node",
    about = "Linkchain in-memory ledger harness",
    version,
    propagate_version = true
)]
pub struct LinkchainCli {
    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "LINKCHAIN_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format written to stderr.
    #[arg(long, global = true, env = "LINKCHAIN_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append two sample batches to a fresh chain and print every block.
    Demo(DemoArgs),
    /// Append from many threads at once, then verify the chain.
    Stress(StressArgs),
    /// Print version information and exit.
    Version,
}

/// How blocks are written to stdout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One labelled paragraph per block.
    Pretty,
    /// The chain's JSON export.
    Json,
}

/// Log line format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

/// Arguments for the `demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Output format for the printed chain.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Arguments for the `stress` subcommand.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Number of concurrent writer threads.
    #[arg(long, short = 'w', env = "LINKCHAIN_WRITERS", default_value_t = 4)]
    pub writers: usize,

    /// Batches appended by each writer.
    #[arg(long, short = 'b', env = "LINKCHAIN_BATCHES", default_value_t = 100)]
    pub batches: usize,

    /// Transactions per batch.
    #[arg(long, short = 't', default_value_t = 3)]
    pub txs: usize,

    /// Print every block after the run instead of just the summary.
    #[arg(long, value_enum)]
    pub dump: Option<OutputFormat>,
}
