//! Concurrent settlement of independent sessions
//!
//! This module provides the `BatchProcessor` struct, which settles a batch of
//! sessions in parallel. Sessions share no state, so each one is handed to its
//! own tokio task; outcomes land in a shared `AsyncSessionStore`.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── SettlementEngine         (stateless, copied into each task)
//!     └── Arc<AsyncSessionStore>   (thread-safe outcome storage)
//! ```
//!
//! # Ordering
//!
//! Tasks finish in any order. Callers that need deterministic output read the
//! store back in session first-appearance order, which [`process_sessions`]
//! returns.
//!
//! [`process_sessions`]: BatchProcessor::process_sessions

use std::sync::Arc;

use super::session_store::{AsyncSessionStore, SessionOutcome};
use crate::core::engine::SettlementEngine;
use crate::core::session_book::SessionInput;
use crate::types::{SessionId, SettlementError};
use tokio::task::JoinError;
use tracing::error;

/// Batch processor settling sessions concurrently
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Engine used by every task
    engine: SettlementEngine,

    /// Shared outcome storage
    store: Arc<AsyncSessionStore>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine applied to every session
    /// * `store` - Arc-wrapped store that receives each session's outcome
    pub fn new(engine: SettlementEngine, store: Arc<AsyncSessionStore>) -> Self {
        Self { engine, store }
    }

    /// Settle one session and record its outcome
    pub async fn process_session(&self, session: SessionId, input: SessionInput) {
        let outcome = input.settle(&self.engine);
        self.store.store(session, outcome);
    }

    /// Settle a batch of sessions concurrently
    ///
    /// Spawns one tokio task per session and waits for all of them.
    ///
    /// # Returns
    ///
    /// The outcomes in the same order as `sessions`. A session whose task
    /// panicked is reported as `SettlementError::TaskFailed`.
    pub async fn process_sessions(
        &self,
        sessions: Vec<(SessionId, SessionInput)>,
    ) -> Vec<(SessionId, SessionOutcome)> {
        let mut tasks = Vec::with_capacity(sessions.len());

        for (session, input) in sessions {
            let processor = self.clone();
            let task_session = session.clone();
            let handle = tokio::spawn(async move {
                processor.process_session(task_session, input).await
            });
            tasks.push((session, handle));
        }

        let mut order = Vec::with_capacity(tasks.len());
        for (session, handle) in tasks {
            self.finish_task(&session, handle.await);
            order.push(session);
        }

        order
            .into_iter()
            .map(|session| {
                let outcome = self.store.take(&session).unwrap_or_else(|| {
                    Err(SettlementError::task_failed("no outcome was recorded"))
                });
                (session, outcome)
            })
            .collect()
    }

    /// Record a failed task as the outcome of its session
    fn finish_task(&self, session: &SessionId, result: Result<(), JoinError>) {
        if let Err(e) = result {
            error!(session = %session, "Settlement task panicked: {}", e);
            self.store
                .store(session.clone(), Err(SettlementError::task_failed(e.to_string())));
        }
    }
}
