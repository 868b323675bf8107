//! Processing strategy module for settlement pipelines
//!
//! This module defines the Strategy pattern for complete settlement pipelines,
//! covering CSV reading, per-session settlement, and CSV output. Different
//! implementations (sequential, concurrent) can be selected at runtime.

use crate::cli::StrategyType;
use crate::core::r#async::SessionOutcome;
use crate::core::{EngineConfig, SessionBook};
use crate::io::{RowRejection, SessionRow};
use crate::types::{SessionId, Settlement, Side};
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete settlement pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Settle every session in the input file and write transfers to output
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed, even if some sessions were rejected
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// Rejected rows and sessions are logged and left out of the output; they
    /// never stop the remaining sessions from being settled.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is ignored by the sync strategy; the async strategy falls back to
/// `BatchConfig::default()` when it is `None`.
pub fn create_strategy(
    strategy_type: StrategyType,
    engine_config: EngineConfig,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(engine_config)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(engine_config, config))
        }
    }
}

/// Add one reader result to the session book
///
/// A rejected row poisons its session when the session is known; otherwise the
/// row is only logged.
pub(crate) fn record_row(book: &mut SessionBook, row: Result<SessionRow, RowRejection>) {
    match row {
        Ok(row) => book.record(row.session, row.participant),
        Err(RowRejection {
            session: Some(session),
            error,
        }) => {
            warn!(session = %session, "Rejected participant row: {}", error);
            book.reject(session, error);
        }
        Err(RowRejection {
            session: None,
            error,
        }) => {
            warn!("Unreadable CSV row: {}", error);
        }
    }
}

/// Keep settled sessions, logging the rejected ones
pub(crate) fn collect_settled(
    outcomes: Vec<(SessionId, SessionOutcome)>,
) -> Vec<(SessionId, Settlement)> {
    outcomes
        .into_iter()
        .filter_map(|(session, outcome)| match outcome {
            Ok(settlement) => {
                if !settlement.leftover.is_empty() {
                    warn!(
                        session = %session,
                        entries = settlement.leftover.len(),
                        unpaid_credit = %settlement.leftover_on(Side::Creditor),
                        uncollected_debt = %settlement.leftover_on(Side::Debtor),
                        "Session settled within tolerance with an unmatched remainder"
                    );
                }
                Some((session, settlement))
            }
            Err(e) => {
                warn!(session = %session, "Session rejected: {}", e);
                None
            }
        })
        .collect()
}
