use crate::core::EngineConfig;
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Settle group debts from net participant balances
#[derive(Parser, Debug)]
#[command(name = "settlement-engine")]
#[command(about = "Turn net participant balances into a list of settling transfers", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing participant balances
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for settling sessions
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent sessions"
    )]
    pub strategy: StrategyType,

    /// Number of rows per read batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per read batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of sessions settled concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Accepted imbalance per session
    #[arg(
        long = "tolerance",
        value_name = "AMOUNT",
        default_value = "0",
        value_parser = parse_tolerance,
        help = "Largest accepted absolute balance sum per session (default: 0)"
    )]
    pub tolerance: Decimal,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Parse a tolerance value, rejecting negative amounts
fn parse_tolerance(value: &str) -> Result<Decimal, String> {
    let tolerance = Decimal::from_str(value.trim())
        .map_err(|e| format!("invalid decimal '{}': {}", value, e))?;
    if tolerance.is_sign_negative() && !tolerance.is_zero() {
        return Err(format!("tolerance must not be negative, got {}", tolerance));
    }
    Ok(tolerance)
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults. Zero values are rejected by
    /// `BatchConfig::new`, which logs a warning and uses the default instead.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create an EngineConfig from CLI arguments
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::with_tolerance(self.tolerance)
    }
}
