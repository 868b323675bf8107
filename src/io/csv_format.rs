//! CSV format handling for participant balances and transfer output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvParticipantRecord structure for deserialization
//! - Conversion from CSV records to session rows
//! - Transfer output serialization
//!
//! All functions are pure (no I/O beyond the supplied writer) for easy testing.
//!
//! # Input format
//!
//! ```text
//! session,id,name,balance
//! friday,p1,Alice,30.00
//! friday,p2,Bob,-30.00
//! ```
//!
//! The `session` column may be empty or missing entirely, in which case the
//! row belongs to the [`DEFAULT_SESSION`].

use crate::types::{Participant, SessionId, Settlement, SettlementError, DEFAULT_SESSION};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Every field is optional at this layer so that a missing value is reported
/// as a malformed participant of the right session instead of a bare CSV error.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvParticipantRecord {
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
}

/// One participant tagged with the session it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub session: SessionId,
    pub participant: Participant,
}

/// A row that could not be turned into a participant
///
/// `session` is known whenever the row itself could be read, which lets the
/// caller reject just that session.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    pub session: Option<SessionId>,
    pub error: SettlementError,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Convert a CsvParticipantRecord to a SessionRow
///
/// # Arguments
///
/// * `record` - The deserialized CSV record
/// * `line` - Line number of the record, used in error messages
///
/// # Returns
///
/// * `Ok(SessionRow)` - Successfully converted record
/// * `Err(RowRejection)` - The session the row belonged to and why it was rejected
pub fn convert_csv_record(
    record: CsvParticipantRecord,
    line: Option<u64>,
) -> Result<SessionRow, RowRejection> {
    let session = non_empty(record.session).unwrap_or_else(|| DEFAULT_SESSION.to_string());

    let reject = |message: String| RowRejection {
        session: Some(session.clone()),
        error: SettlementError::malformed_participant(line, message),
    };

    let identifier = non_empty(record.id).ok_or_else(|| reject("missing id".to_string()))?;

    let display_name = non_empty(record.name)
        .ok_or_else(|| reject(format!("participant '{}' is missing a name", identifier)))?;

    let balance_str = non_empty(record.balance).ok_or_else(|| {
        reject(format!(
            "participant '{}' is missing a balance",
            identifier
        ))
    })?;

    let net_balance = Decimal::from_str(&balance_str).map_err(|_| {
        reject(format!(
            "invalid balance '{}' for participant '{}'",
            balance_str, identifier
        ))
    })?;

    Ok(SessionRow {
        session,
        participant: Participant {
            identifier,
            display_name,
            net_balance,
        },
    })
}

/// Column names of the transfer output
pub const TRANSFER_HEADER: [&str; 6] = ["session", "from_id", "from", "to_id", "to", "amount"];

/// Write settled sessions to CSV format
///
/// Writes transfers with columns: session, from_id, from, to_id, to, amount.
/// Sessions are written in the order given and transfers in engine order;
/// nothing is sorted. Amounts are written exactly, without trailing zeros.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(SettlementError)` if a write error occurred
pub fn write_transfers_csv(
    sessions: &[(SessionId, Settlement)],
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(TRANSFER_HEADER)?;

    for (session, settlement) in sessions {
        for transfer in &settlement.transfers {
            let amount = transfer.amount.normalize().to_string();
            writer.write_record([
                session.as_str(),
                transfer.from_id.as_str(),
                transfer.from.as_str(),
                transfer.to_id.as_str(),
                transfer.to.as_str(),
                amount.as_str(),
            ])?;
        }
    }

    writer.flush()?;

    Ok(())
}
