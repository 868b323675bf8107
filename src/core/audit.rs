//! Settlement audit
//!
//! Re-checks a transfer list against the balances it was meant to settle,
//! without trusting how it was produced. Used by the engine's tests and
//! available to callers that receive transfers from elsewhere.

use crate::core::partitioner::partition;
use crate::types::{Participant, SettlementError, Transfer};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Upper bound on the number of transfers the greedy matcher may emit
///
/// `creditors + debtors - 1`, or zero when either side is empty.
pub fn transfer_count_bound(participants: &[Participant]) -> usize {
    let queues = partition(participants);
    if queues.creditors.is_empty() || queues.debtors.is_empty() {
        return 0;
    }
    queues.creditors.len() + queues.debtors.len() - 1
}

/// Verify that `transfers` brings every participant to zero
///
/// # Errors
///
/// Returns an error if:
/// - A transfer pays a participant from itself
/// - A transfer amount is zero or negative
/// - A transfer names an identifier not present in `participants`
/// - Some participant's received minus paid total differs from their net balance
pub fn verify_settlement(
    participants: &[Participant],
    transfers: &[Transfer],
) -> Result<(), SettlementError> {
    let mut net: HashMap<&str, Decimal> = participants
        .iter()
        .map(|p| (p.identifier.as_str(), Decimal::ZERO))
        .collect();

    for transfer in transfers {
        if transfer.from_id == transfer.to_id {
            return Err(SettlementError::self_transfer(
                &transfer.from_id,
                transfer.amount,
            ));
        }

        if transfer.amount <= Decimal::ZERO {
            return Err(SettlementError::non_positive_transfer(
                &transfer.from_id,
                &transfer.to_id,
                transfer.amount,
            ));
        }

        let payer = net
            .get_mut(transfer.from_id.as_str())
            .ok_or_else(|| SettlementError::unknown_participant(&transfer.from_id))?;
        *payer = payer
            .checked_sub(transfer.amount)
            .ok_or_else(|| SettlementError::arithmetic_overflow("audit paid total"))?;

        let payee = net
            .get_mut(transfer.to_id.as_str())
            .ok_or_else(|| SettlementError::unknown_participant(&transfer.to_id))?;
        *payee = payee
            .checked_add(transfer.amount)
            .ok_or_else(|| SettlementError::arithmetic_overflow("audit received total"))?;
    }

    for participant in participants {
        let actual = net
            .get(participant.identifier.as_str())
            .copied()
            .unwrap_or(Decimal::ZERO);

        if actual != participant.net_balance {
            return Err(SettlementError::conservation_violated(
                &participant.identifier,
                participant.net_balance,
                actual,
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn participants() -> Vec<Participant> {
        vec![
            Participant::new("a", "A", dec!(30)),
            Participant::new("b", "B", dec!(10)),
            Participant::new("c", "C", dec!(-40)),
        ]
    }

    fn transfer(from: &str, to: &str, amount: Decimal) -> Transfer {
        Transfer {
            from_id: from.to_string(),
            from: from.to_uppercase(),
            to_id: to.to_string(),
            to: to.to_uppercase(),
            amount,
        }
    }

    #[rstest]
    fn test_verify_accepts_correct_settlement(participants: Vec<Participant>) {
        let transfers = vec![transfer("c", "a", dec!(30)), transfer("c", "b", dec!(10))];
        assert!(verify_settlement(&participants, &transfers).is_ok());
    }

    #[rstest]
    fn test_verify_rejects_short_payment(participants: Vec<Participant>) {
        let transfers = vec![transfer("c", "a", dec!(30)), transfer("c", "b", dec!(5))];

        let result = verify_settlement(&participants, &transfers);

        assert_eq!(
            result.unwrap_err(),
            SettlementError::ConservationViolated {
                participant: "b".to_string(),
                expected: dec!(10),
                actual: dec!(5),
            }
        );
    }

    #[rstest]
    fn test_verify_rejects_self_transfer(participants: Vec<Participant>) {
        let transfers = vec![transfer("c", "c", dec!(1))];
        assert!(matches!(
            verify_settlement(&participants, &transfers).unwrap_err(),
            SettlementError::SelfTransfer { .. }
        ));
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-3))]
    fn test_verify_rejects_non_positive_amount(
        participants: Vec<Participant>,
        #[case] amount: Decimal,
    ) {
        let transfers = vec![transfer("c", "a", amount)];
        assert!(matches!(
            verify_settlement(&participants, &transfers).unwrap_err(),
            SettlementError::NonPositiveTransfer { .. }
        ));
    }

    #[rstest]
    fn test_verify_rejects_unknown_participant(participants: Vec<Participant>) {
        let transfers = vec![transfer("x", "a", dec!(30))];
        assert_eq!(
            verify_settlement(&participants, &transfers).unwrap_err(),
            SettlementError::UnknownParticipant {
                participant: "x".to_string()
            }
        );
    }

    #[test]
    fn test_verify_all_zero_needs_no_transfers() {
        let participants = vec![
            Participant::new("a", "A", dec!(0)),
            Participant::new("b", "B", dec!(0)),
        ];
        assert!(verify_settlement(&participants, &[]).is_ok());
    }

    #[rstest]
    #[case::empty(vec![], 0)]
    #[case::only_zero(vec![("a", dec!(0))], 0)]
    #[case::one_pair(vec![("a", dec!(5)), ("b", dec!(-5))], 1)]
    #[case::two_by_one(vec![("a", dec!(30)), ("b", dec!(10)), ("c", dec!(-40))], 2)]
    #[case::three_by_two(
        vec![("a", dec!(1)), ("b", dec!(2)), ("c", dec!(3)), ("d", dec!(-4)), ("e", dec!(-2))],
        4
    )]
    fn test_transfer_count_bound(#[case] balances: Vec<(&str, Decimal)>, #[case] expected: usize) {
        let participants: Vec<Participant> = balances
            .into_iter()
            .map(|(id, balance)| Participant::new(id, id, balance))
            .collect();

        assert_eq!(transfer_count_bound(&participants), expected);
    }
}
