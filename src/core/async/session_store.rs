//! Thread-safe settlement outcome storage for async session processing
//!
//! This module provides the `AsyncSessionStore` struct, which collects the
//! outcome of every settled session while many sessions are being settled
//! concurrently.
//!
//! # Design
//!
//! The `AsyncSessionStore` uses `DashMap` (a concurrent HashMap) keyed by
//! session ID. Each worker task writes exactly one entry, so writers never
//! contend on the same key; DashMap's sharding keeps unrelated writers from
//! blocking each other.

use crate::types::{SessionId, Settlement, SettlementError};
use dashmap::DashMap;

/// Outcome of settling one session
pub type SessionOutcome = Result<Settlement, SettlementError>;

/// Thread-safe outcome store shared by concurrent settlement tasks
#[derive(Debug, Default)]
pub struct AsyncSessionStore {
    /// Concurrent HashMap storing outcomes by session ID
    outcomes: DashMap<SessionId, SessionOutcome>,
}

impl AsyncSessionStore {
    /// Create a new empty AsyncSessionStore
    pub fn new() -> Self {
        Self {
            outcomes: DashMap::new(),
        }
    }

    /// Store the outcome for a session, replacing any earlier one
    pub fn store(&self, session: SessionId, outcome: SessionOutcome) {
        self.outcomes.insert(session, outcome);
    }

    /// Remove and return the outcome for a session
    pub fn take(&self, session: &str) -> Option<SessionOutcome> {
        self.outcomes.remove(session).map(|(_, outcome)| outcome)
    }

    /// Number of stored outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no outcome has been stored
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
