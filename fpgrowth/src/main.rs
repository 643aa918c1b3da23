use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fpgrowth::fp::io::read_transactions_file;
use fpgrowth::{FPGrowth, MinerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fpgrowth", about = "Mine frequent itemsets with FP-Growth")]
struct Cli {
    /// Transactions file, one transaction per line, items separated by spaces.
    input: PathBuf,
    /// Minimum support as a fraction of transactions, in (0, 1].
    #[arg(long, short = 's')]
    min_support: f64,
    /// Abort when the estimated memory held by trees and results exceeds this.
    #[arg(long)]
    memory_budget_mb: Option<usize>,
    /// Fixed capacity of the itemset prefix buffer.
    #[arg(long)]
    buffer_capacity: Option<usize>,
    /// Print only the run statistics.
    #[arg(long)]
    stats_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = MinerConfig::new(cli.min_support);
    if let Some(mb) = cli.memory_budget_mb {
        config = config.with_memory_budget(mb.saturating_mul(1024 * 1024));
    }
    if let Some(capacity) = cli.buffer_capacity {
        config = config.with_buffer_capacity(capacity);
    }
    let miner = FPGrowth::with_config(config).context("invalid miner configuration")?;

    let transactions = read_transactions_file(&cli.input)
        .with_context(|| format!("failed to read transactions from {}", cli.input.display()))?;
    let result = miner.run(&transactions).context("mining failed")?;

    if !cli.stats_only {
        let mut out = BufWriter::new(io::stdout().lock());
        for itemset in result.itemsets.iter() {
            writeln!(out, "{itemset}")?;
        }
        out.flush()?;
    }
    eprint!("{}", result.stats);

    Ok(())
}
