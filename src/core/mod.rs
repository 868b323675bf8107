//! Core business logic module
//!
//! This module contains the settlement components:
//! - `validator` - Record checks and the zero-sum precondition
//! - `partitioner` - Splits participants into creditor and debtor queues
//! - `matcher` - Greedy two-cursor matching of the queues into transfers
//! - `engine` - Orchestrates validate → partition → match for one session
//! - `audit` - Independent verification of a produced settlement
//! - `session_book` - Groups input rows into sessions
//! - `async` - Concurrent settlement of many sessions

pub mod r#async;
pub mod audit;
pub mod engine;
pub mod matcher;
pub mod partitioner;
pub mod session_book;
pub mod validator;

pub use audit::{transfer_count_bound, verify_settlement};
pub use engine::{EngineConfig, SettlementEngine};
pub use matcher::{match_queues, MatchOutcome};
pub use partitioner::{partition, Partition};
pub use r#async::{AsyncSessionStore, BatchProcessor};
pub use session_book::{SessionBook, SessionInput};
pub use validator::validate_participants;
