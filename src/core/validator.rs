//! Input validation for a settlement session
//!
//! The zero-sum invariant is a caller precondition. This module enforces it at
//! the engine boundary, together with the record-level checks that must pass
//! before any participant is partitioned.

use crate::types::{Participant, SettlementError};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Sum all net balances with overflow checking
pub fn balance_sum(participants: &[Participant]) -> Result<Decimal, SettlementError> {
    participants
        .iter()
        .try_fold(Decimal::ZERO, |acc, participant| {
            acc.checked_add(participant.net_balance)
                .ok_or_else(|| SettlementError::arithmetic_overflow("balance sum"))
        })
}

/// Validate a session's participants
///
/// # Errors
///
/// Returns an error if:
/// - A participant has an empty identifier or display name
/// - Two participants share an identifier
/// - The absolute sum of net balances exceeds `tolerance`
/// - Summing the balances overflows
pub fn validate_participants(
    participants: &[Participant],
    tolerance: Decimal,
) -> Result<(), SettlementError> {
    let mut seen = HashSet::with_capacity(participants.len());

    for participant in participants {
        if participant.identifier.trim().is_empty() {
            return Err(SettlementError::malformed_participant(
                None,
                format!(
                    "participant '{}' has an empty identifier",
                    participant.display_name
                ),
            ));
        }

        if participant.display_name.trim().is_empty() {
            return Err(SettlementError::malformed_participant(
                None,
                format!(
                    "participant '{}' has an empty display name",
                    participant.identifier
                ),
            ));
        }

        if !seen.insert(participant.identifier.as_str()) {
            return Err(SettlementError::duplicate_participant(
                &participant.identifier,
            ));
        }
    }

    let sum = balance_sum(participants)?;
    if sum.abs() > tolerance {
        return Err(SettlementError::invalid_balance_sum(sum, tolerance));
    }

    Ok(())
}
