//! Error types for the settlement engine
//!
//! This module defines all error types that can occur while reading balances,
//! settling a session, or auditing a produced settlement.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Input Errors**: Malformed participants, duplicates, non-zero-sum balances
//! - **Arithmetic Errors**: Overflow while summing or subtracting amounts
//! - **Audit Errors**: A transfer list that does not settle its participants

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the settlement engine
///
/// Every error is local to one settlement request. None of them leave state
/// behind that could affect a later request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV structure could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Participant record is missing a required field or has a non-numeric balance
    ///
    /// Rejected before partitioning.
    #[error("Malformed participant{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedParticipant {
        /// Line number of the offending record (if it came from a file)
        line: Option<u64>,
        /// What is wrong with the record
        message: String,
    },

    /// Two participants in one session share an identifier
    #[error("Duplicate participant identifier '{identifier}'")]
    DuplicateParticipant {
        /// The repeated identifier
        identifier: String,
    },

    /// Net balances do not sum to zero within the tolerance
    ///
    /// The engine refuses to produce a partial settlement; the caller decides
    /// whether to re-normalise or abort.
    #[error("Net balances sum to {sum}, outside tolerance {tolerance}")]
    InvalidBalanceSum {
        /// Actual sum of all net balances
        sum: Decimal,
        /// Largest absolute sum that is accepted
        tolerance: Decimal,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// A participant's received minus paid amount differs from their net balance
    #[error("Participant '{participant}' nets {actual} after settlement, expected {expected}")]
    ConservationViolated {
        /// Identifier of the participant
        participant: String,
        /// Original net balance
        expected: Decimal,
        /// Received minus paid across all transfers
        actual: Decimal,
    },

    /// A transfer pays from a participant to itself
    #[error("Transfer of {amount} from '{participant}' to itself")]
    SelfTransfer {
        /// Identifier of the participant
        participant: String,
        /// Transfer amount
        amount: Decimal,
    },

    /// A transfer references an identifier that is not part of the session
    #[error("Transfer references unknown participant '{participant}'")]
    UnknownParticipant {
        /// The unknown identifier
        participant: String,
    },

    /// A transfer carries a zero or negative amount
    #[error("Transfer from '{from}' to '{to}' has non-positive amount {amount}")]
    NonPositiveTransfer {
        /// Paying identifier
        from: String,
        /// Receiving identifier
        to: String,
        /// Offending amount
        amount: Decimal,
    },

    /// The task settling a session stopped before producing an outcome
    #[error("Settlement task failed: {message}")]
    TaskFailed {
        /// Why the task stopped
        message: String,
    },
}

// Conversion from io::Error to SettlementError
impl From<std::io::Error> for SettlementError {
    fn from(error: std::io::Error) -> Self {
        SettlementError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SettlementError
impl From<csv::Error> for SettlementError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SettlementError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SettlementError {
    /// Create the error for an input file that could not be opened
    ///
    /// A missing file becomes FileNotFound; any other failure is an IoError.
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => SettlementError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => SettlementError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            },
        }
    }

    /// Create a TaskFailed error
    pub fn task_failed(message: impl Into<String>) -> Self {
        SettlementError::TaskFailed {
            message: message.into(),
        }
    }

    /// Create a MalformedParticipant error
    pub fn malformed_participant(line: Option<u64>, message: impl Into<String>) -> Self {
        SettlementError::MalformedParticipant {
            line,
            message: message.into(),
        }
    }

    /// Create a DuplicateParticipant error
    pub fn duplicate_participant(identifier: &str) -> Self {
        SettlementError::DuplicateParticipant {
            identifier: identifier.to_string(),
        }
    }

    /// Create an InvalidBalanceSum error
    pub fn invalid_balance_sum(sum: Decimal, tolerance: Decimal) -> Self {
        SettlementError::InvalidBalanceSum { sum, tolerance }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        SettlementError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a ConservationViolated error
    pub fn conservation_violated(participant: &str, expected: Decimal, actual: Decimal) -> Self {
        SettlementError::ConservationViolated {
            participant: participant.to_string(),
            expected,
            actual,
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(participant: &str, amount: Decimal) -> Self {
        SettlementError::SelfTransfer {
            participant: participant.to_string(),
            amount,
        }
    }

    /// Create an UnknownParticipant error
    pub fn unknown_participant(participant: &str) -> Self {
        SettlementError::UnknownParticipant {
            participant: participant.to_string(),
        }
    }

    /// Create a NonPositiveTransfer error
    pub fn non_positive_transfer(from: &str, to: &str, amount: Decimal) -> Self {
        SettlementError::NonPositiveTransfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }
    }
}
