//! Asynchronous batch processing strategy
//!
//! Reads rows in batches through the AsyncReader, groups them into sessions,
//! and settles all sessions concurrently on a tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── SessionBook (rows grouped by session)
//!     └── BatchProcessor (one task per session)
//!         └── AsyncSessionStore (thread-safe outcomes)
//! ```
//!
//! A session can span several read batches, so every batch is read before
//! any session is settled. Output order matches the sync strategy exactly.

use crate::core::r#async::{AsyncSessionStore, BatchProcessor};
use crate::core::{EngineConfig, SessionBook, SettlementEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_transfers_csv;
use crate::strategy::{collect_settled, record_row, ProcessingStrategy};
use crate::types::SettlementError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for batch processing
///
/// Controls how many rows are read per batch and how many worker threads
/// settle sessions.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of rows per read batch
    pub batch_size: usize,
    /// Number of worker threads settling sessions concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Send + Sync; all shared state lives behind Arc in the BatchProcessor.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    engine: SettlementEngine,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(engine_config: EngineConfig, config: BatchConfig) -> Self {
        Self {
            engine: SettlementEngine::new(engine_config),
            config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| SettlementError::open_failed(input_path, e).to_string())?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut book = SessionBook::new();
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                for row in batch {
                    record_row(&mut book, row);
                }
            }

            info!(
                sessions = book.len(),
                workers = self.config.max_concurrent_batches,
                "Settling sessions concurrently"
            );

            let processor = BatchProcessor::new(self.engine, Arc::new(AsyncSessionStore::new()));
            let outcomes = processor.process_sessions(book.into_sessions()).await;

            let settled = collect_settled(outcomes);
            write_transfers_csv(&settled, output).map_err(|e| e.to_string())?;

            Ok(())
        })
    }
}
