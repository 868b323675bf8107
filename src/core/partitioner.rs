//! Balance partitioning
//!
//! Splits a session's participants into the two queues the matcher drains.
//! Creditors and debtors keep their relative input order, which fixes the
//! order of the transfers produced later. Participants with a zero balance
//! are already settled and are dropped.

use crate::types::{Participant, Side, WorkingEntry};
use rust_decimal::Decimal;

/// Creditor and debtor queues built from one participant list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Participants owed money, in input order
    pub creditors: Vec<WorkingEntry>,
    /// Participants owing money, in input order
    pub debtors: Vec<WorkingEntry>,
}

impl Partition {
    /// Whether there is nothing to settle
    pub fn is_empty(&self) -> bool {
        self.creditors.is_empty() && self.debtors.is_empty()
    }
}

/// Partition participants into creditors and debtors
///
/// Pure function over its input; the participant slice is never modified.
pub fn partition(participants: &[Participant]) -> Partition {
    let mut result = Partition::default();

    for participant in participants {
        if participant.net_balance > Decimal::ZERO {
            result
                .creditors
                .push(WorkingEntry::from_participant(participant, Side::Creditor));
        } else if participant.net_balance < Decimal::ZERO {
            result
                .debtors
                .push(WorkingEntry::from_participant(participant, Side::Debtor));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn names(entries: &[WorkingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.display_name.as_str()).collect()
    }

    #[test]
    fn test_partition_empty_input() {
        let result = partition(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let participants = vec![
            Participant::new("1", "A", dec!(5)),
            Participant::new("2", "B", dec!(-3)),
            Participant::new("3", "C", dec!(7)),
            Participant::new("4", "D", dec!(-9)),
            Participant::new("5", "E", dec!(0)),
        ];

        let result = partition(&participants);

        assert_eq!(names(&result.creditors), vec!["A", "C"]);
        assert_eq!(names(&result.debtors), vec!["B", "D"]);
    }

    #[test]
    fn test_partition_drops_zero_balances() {
        let participants = vec![
            Participant::new("1", "A", dec!(0)),
            Participant::new("2", "B", dec!(0.00)),
        ];

        assert!(partition(&participants).is_empty());
    }

    #[test]
    fn test_partition_debtor_remaining_is_positive() {
        let participants = vec![Participant::new("1", "A", dec!(-40.25))];

        let result = partition(&participants);

        assert_eq!(result.debtors.len(), 1);
        assert_eq!(result.debtors[0].remaining, dec!(40.25));
        assert_eq!(result.debtors[0].side, Side::Debtor);
    }

    #[test]
    fn test_partition_does_not_touch_input() {
        let participants = vec![
            Participant::new("1", "A", dec!(10)),
            Participant::new("2", "B", dec!(-10)),
        ];
        let before = participants.clone();

        let _ = partition(&participants);

        assert_eq!(participants, before);
    }
}
