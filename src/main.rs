//! Settlement Engine CLI
//!
//! Command-line interface for settling group debts from CSV files of net
//! participant balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- balances.csv > transfers.csv
//! cargo run -- --strategy sync balances.csv > transfers.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 balances.csv > transfers.csv
//! cargo run -- --tolerance 0.01 balances.csv > transfers.csv
//! RUST_LOG=debug cargo run -- balances.csv > transfers.csv
//! ```
//!
//! Transfers are written to stdout; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success, even if individual sessions were rejected
//! - 1: Error (file not found, file not readable, output failure, etc.)

use rust_settlement_engine::cli;
use rust_settlement_engine::strategy;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.to_engine_config(), config)
    };

    info!(
        input = %args.input_file.display(),
        strategy = ?args.strategy,
        tolerance = %args.tolerance,
        "Settling balances"
    );

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!("{}", e);
        process::exit(1);
    }
}
