//! Rust Settlement Engine Library
//! # Overview
//!
//! This library turns the net balances of a group of participants into a list
//! of directed transfers that brings every balance to zero. Input and output
//! are CSV, processed by either a sequential or a concurrent strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Participant, Transfer, Settlement, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::validator`] - Record checks and the zero-sum precondition
//!   - [`core::partitioner`] - Split into creditor and debtor queues
//!   - [`core::matcher`] - Greedy two-cursor matching
//!   - [`core::engine`] - Orchestration of one settlement session
//!   - [`core::audit`] - Post-settlement conservation checks
//! - [`io`] - CSV reading and writing
//! - [`strategy`] - Sync and async end-to-end pipelines
//!
//! # Settlement
//!
//! Participants with a positive balance are owed money (creditors), those with
//! a negative balance owe money (debtors), and zero balances take no part.
//! Creditors and debtors are matched in input order; every step moves the
//! smaller of the two outstanding amounts from the debtor to the creditor.
//!
//! ```
//! use rust_settlement_engine::{Participant, SettlementEngine};
//! use rust_decimal_macros::dec;
//!
//! let participants = vec![
//!     Participant::new("a", "Alice", dec!(30)),
//!     Participant::new("b", "Bob", dec!(10)),
//!     Participant::new("c", "Carol", dec!(-40)),
//! ];
//!
//! let settlement = SettlementEngine::default().settle(&participants).unwrap();
//!
//! assert_eq!(settlement.transfers.len(), 2);
//! assert_eq!(settlement.transfers[0].from, "Carol");
//! assert_eq!(settlement.transfers[0].to, "Alice");
//! assert_eq!(settlement.transfers[0].amount, dec!(30));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{match_queues, partition, verify_settlement, EngineConfig, SettlementEngine};
pub use io::write_transfers_csv;
pub use types::{
    Participant, ParticipantId, SessionId, Settlement, SettlementError, Side, Transfer,
    WorkingEntry, DEFAULT_SESSION,
};
