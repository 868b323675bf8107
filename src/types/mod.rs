//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `participant`: Participant input records and matcher working entries
//! - `transfer`: Transfer instructions and settlement results
//! - `error`: Error types for the settlement engine

pub mod error;
pub mod participant;
pub mod transfer;

pub use error::SettlementError;
pub use participant::{
    Participant, ParticipantId, SessionId, Side, WorkingEntry, DEFAULT_SESSION,
};
pub use transfer::{Settlement, Transfer};
