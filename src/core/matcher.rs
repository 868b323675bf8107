//! Greedy settlement matching
//!
//! Two cursors walk the creditor and debtor queues. Each step pays the smaller
//! of the two outstanding amounts from the current debtor to the current
//! creditor, then advances whichever side reached zero. When both reach zero
//! in the same step, both cursors advance and the pair produces exactly one
//! transfer.
//!
//! No sorting by magnitude is performed, so the transfer count is bounded by
//! `creditors + debtors - 1` rather than minimal.

use crate::types::{SettlementError, Transfer, WorkingEntry};
use rust_decimal::Decimal;

/// What the matcher produced once either queue ran out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Transfers in production order
    pub transfers: Vec<Transfer>,

    /// Entries on the side that was not exhausted, with their remainders
    ///
    /// Empty when the queues summed to the same total.
    pub leftover: Vec<WorkingEntry>,
}

impl MatchOutcome {
    /// Total amount still outstanding across the leftover entries
    pub fn leftover_total(&self) -> Result<Decimal, SettlementError> {
        self.leftover.iter().try_fold(Decimal::ZERO, |acc, entry| {
            acc.checked_add(entry.remaining)
                .ok_or_else(|| SettlementError::arithmetic_overflow("leftover total"))
        })
    }
}

/// Drain the creditor and debtor queues into a sequence of transfers
///
/// Takes ownership of the working entries; the participants they were built
/// from are untouched. Only fails if subtracting a payment overflows, which
/// cannot happen for entries built by the partitioner.
pub fn match_queues(
    mut creditors: Vec<WorkingEntry>,
    mut debtors: Vec<WorkingEntry>,
) -> Result<MatchOutcome, SettlementError> {
    let mut transfers = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
    let mut i = 0;
    let mut j = 0;

    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];

        let payment = creditor.remaining.min(debtor.remaining);

        // A zero payment only means one side was already drained; just advance.
        if payment > Decimal::ZERO {
            transfers.push(Transfer::between(debtor, creditor, payment));

            creditor.remaining = creditor
                .remaining
                .checked_sub(payment)
                .ok_or_else(|| SettlementError::arithmetic_overflow("creditor remaining"))?;
            debtor.remaining = debtor
                .remaining
                .checked_sub(payment)
                .ok_or_else(|| SettlementError::arithmetic_overflow("debtor remaining"))?;
        }

        let creditor_done = creditor.is_settled();
        let debtor_done = debtor.is_settled();

        if creditor_done {
            i += 1;
        }
        if debtor_done {
            j += 1;
        }
    }

    let leftover = creditors
        .drain(i..)
        .chain(debtors.drain(j..))
        .filter(|entry| !entry.is_settled())
        .collect();

    Ok(MatchOutcome {
        transfers,
        leftover,
    })
}
