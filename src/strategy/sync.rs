//! Synchronous processing strategy
//!
//! Reads every row with the SyncReader, groups rows into sessions, then
//! settles the sessions one after another on the calling thread.
//!
//! # Design
//!
//! The SyncProcessingStrategy only orchestrates, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Session grouping to `SessionBook`
//! - Settlement to `SettlementEngine`
//! - CSV output to `csv_format::write_transfers_csv`

use crate::core::{EngineConfig, SessionBook, SettlementEngine};
use crate::io::csv_format::write_transfers_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{collect_settled, record_row, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_settlement_engine::core::EngineConfig;
/// use rust_settlement_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(EngineConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("balances.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    engine: SettlementEngine,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy
    pub fn new(engine_config: EngineConfig) -> Self {
        Self {
            engine: SettlementEngine::new(engine_config),
        }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = SyncReader::new(input_path).map_err(|e| e.to_string())?;

        let mut book = SessionBook::new();
        for row in reader {
            record_row(&mut book, row);
        }

        info!(sessions = book.len(), "Settling sessions sequentially");

        let outcomes = book
            .into_sessions()
            .into_iter()
            .map(|(session, input)| {
                let outcome = input.settle(&self.engine);
                (session, outcome)
            })
            .collect();

        let settled = collect_settled(outcomes);
        write_transfers_csv(&settled, output).map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(strategy: SyncProcessingStrategy, csv_content: &str) -> String {
        let file = create_temp_csv(csv_content);
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sync_strategy_settles_single_session() {
        let output = run(
            SyncProcessingStrategy::default(),
            "id,name,balance\na,A,30\nb,B,10\nc,C,-40\n",
        );

        assert_eq!(
            output,
            "session,from_id,from,to_id,to,amount\n\
             default,c,C,a,A,30\n\
             default,c,C,b,B,10\n"
        );
    }

    #[test]
    fn test_sync_strategy_skips_unbalanced_session() {
        let output = run(
            SyncProcessingStrategy::default(),
            "session,id,name,balance\n\
             bad,a,A,10\n\
             bad,b,B,-5\n\
             good,c,C,15\n\
             good,d,D,-15\n",
        );

        assert_eq!(output, "session,from_id,from,to_id,to,amount\ngood,d,D,c,C,15\n");
    }

    #[test]
    fn test_sync_strategy_skips_session_with_malformed_row() {
        let output = run(
            SyncProcessingStrategy::default(),
            "session,id,name,balance\n\
             s1,a,A,10\n\
             s1,b,B,ten\n\
             s2,c,C,1\n\
             s2,d,D,-1\n",
        );

        assert_eq!(output, "session,from_id,from,to_id,to,amount\ns2,d,D,c,C,1\n");
    }

    #[test]
    fn test_sync_strategy_applies_tolerance() {
        let strategy =
            SyncProcessingStrategy::new(EngineConfig::with_tolerance(dec!(0.01)));

        let output = run(strategy, "id,name,balance\na,A,10.01\nb,B,-10\n");

        assert_eq!(output, "session,from_id,from,to_id,to,amount\ndefault,b,B,a,A,10\n");
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::default();
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "File not found: nonexistent.csv");
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
