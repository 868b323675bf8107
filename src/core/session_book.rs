//! Grouping of input rows into settlement sessions
//!
//! A single input file may carry many independent sessions. The SessionBook
//! collects participants per session, remembers the order in which sessions
//! first appeared, and marks a session as rejected as soon as one of its rows
//! is malformed so that it is never settled from partial data.

use crate::core::engine::SettlementEngine;
use crate::types::{Participant, SessionId, Settlement, SettlementError};
use std::collections::HashMap;

/// Participants collected for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionInput {
    /// Participants in input order
    pub participants: Vec<Participant>,

    /// First row-level error seen for this session, if any
    pub rejection: Option<SettlementError>,
}

impl SessionInput {
    /// Settle this session, or return the row-level error that poisoned it
    pub fn settle(&self, engine: &SettlementEngine) -> Result<Settlement, SettlementError> {
        match &self.rejection {
            Some(error) => Err(error.clone()),
            None => engine.settle(&self.participants),
        }
    }
}

/// Ordered collection of sessions read from one input
#[derive(Debug, Default)]
pub struct SessionBook {
    /// Session IDs in first-appearance order
    order: Vec<SessionId>,
    /// Collected input per session
    sessions: HashMap<SessionId, SessionInput>,
}

impl SessionBook {
    /// Create an empty SessionBook
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, session: SessionId) -> &mut SessionInput {
        if !self.sessions.contains_key(&session) {
            self.order.push(session.clone());
        }
        self.sessions.entry(session).or_default()
    }

    /// Add a participant to its session
    pub fn record(&mut self, session: SessionId, participant: Participant) {
        self.entry(session).participants.push(participant);
    }

    /// Mark a session as rejected
    ///
    /// Only the first error is kept; later rows of the session are still
    /// collected but the session will not be settled.
    pub fn reject(&mut self, session: SessionId, error: SettlementError) {
        let input = self.entry(session);
        if input.rejection.is_none() {
            input.rejection = Some(error);
        }
    }

    /// Number of sessions seen so far
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no session has been seen
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consume the book, yielding sessions in first-appearance order
    pub fn into_sessions(mut self) -> Vec<(SessionId, SessionInput)> {
        self.order
            .into_iter()
            .filter_map(|session| {
                self.sessions
                    .remove(&session)
                    .map(|input| (session, input))
            })
            .collect()
    }
}
