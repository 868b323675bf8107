//! Transfer and settlement result types
//!
//! A transfer is one directed payment instruction from a debtor to a
//! creditor. A settlement is the full result of one engine run.

use super::participant::{ParticipantId, Side, WorkingEntry};
use rust_decimal::Decimal;

/// Directed payment instruction produced by the matcher
///
/// Immutable once created. `amount` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Identifier of the paying debtor
    pub from_id: ParticipantId,

    /// Display name of the paying debtor
    pub from: String,

    /// Identifier of the receiving creditor
    pub to_id: ParticipantId,

    /// Display name of the receiving creditor
    pub to: String,

    /// Amount paid
    pub amount: Decimal,
}

impl Transfer {
    /// Create a transfer from the current debtor to the current creditor
    pub fn between(debtor: &WorkingEntry, creditor: &WorkingEntry, amount: Decimal) -> Self {
        Transfer {
            from_id: debtor.identifier.clone(),
            from: debtor.display_name.clone(),
            to_id: creditor.identifier.clone(),
            to: creditor.display_name.clone(),
            amount,
        }
    }
}

/// Result of settling one session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settlement {
    /// Transfers in the order the matcher produced them
    pub transfers: Vec<Transfer>,

    /// Entries still carrying a remainder when matching stopped
    ///
    /// Empty whenever the input balanced exactly. Non-empty only when a
    /// non-zero tolerance admitted a small imbalance.
    pub leftover: Vec<WorkingEntry>,
}

impl Settlement {
    /// Sum of all transfer amounts
    pub fn total_transferred(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Whether no payments are required
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Unmatched remainder on one side
    ///
    /// For `Side::Creditor` this is credit nobody paid; for `Side::Debtor`, debt
    /// nobody collected.
    pub fn leftover_on(&self, side: Side) -> Decimal {
        self.leftover
            .iter()
            .filter(|entry| entry.side == side)
            .map(|entry| entry.remaining)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Participant;
    use rust_decimal_macros::dec;

    fn entry(id: &str, balance: Decimal, side: Side) -> WorkingEntry {
        WorkingEntry::from_participant(&Participant::new(id, id, balance), side)
    }

    #[test]
    fn test_leftover_on_splits_by_side() {
        let settlement = Settlement {
            transfers: vec![],
            leftover: vec![
                entry("a", dec!(0.01), Side::Creditor),
                entry("b", dec!(0.02), Side::Creditor),
                entry("c", dec!(-0.005), Side::Debtor),
            ],
        };

        assert_eq!(settlement.leftover_on(Side::Creditor), dec!(0.03));
        assert_eq!(settlement.leftover_on(Side::Debtor), dec!(0.005));
    }

    #[test]
    fn test_leftover_on_empty_settlement_is_zero() {
        let settlement = Settlement::default();

        assert_eq!(settlement.leftover_on(Side::Creditor), Decimal::ZERO);
        assert_eq!(settlement.leftover_on(Side::Debtor), Decimal::ZERO);
    }

    #[test]
    fn test_total_transferred() {
        let creditor = entry("a", dec!(5), Side::Creditor);
        let debtor = entry("b", dec!(-5), Side::Debtor);
        let settlement = Settlement {
            transfers: vec![
                Transfer::between(&debtor, &creditor, dec!(2)),
                Transfer::between(&debtor, &creditor, dec!(3)),
            ],
            leftover: vec![],
        };

        assert_eq!(settlement.total_transferred(), dec!(5));
    }
}
