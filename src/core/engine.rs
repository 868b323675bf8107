//! Settlement engine
//!
//! This module provides the SettlementEngine that settles one session by
//! running the validator, the partitioner and the matcher in that order.
//!
//! The engine enforces:
//! - Record-level validation before partitioning
//! - The zero-sum precondition, within the configured tolerance
//! - That no remainder is ever dropped silently

use crate::core::matcher::match_queues;
use crate::core::partitioner::partition;
use crate::core::validator::validate_participants;
use crate::types::{Participant, Settlement, SettlementError};
use rust_decimal::Decimal;
use tracing::debug;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Largest absolute imbalance accepted between creditors and debtors
    ///
    /// Zero by default, meaning balances must cancel exactly.
    pub tolerance: Decimal,
}

impl EngineConfig {
    /// Create a configuration with the given tolerance
    ///
    /// Negative tolerances make no sense and are treated as their absolute value.
    pub fn with_tolerance(tolerance: Decimal) -> Self {
        EngineConfig {
            tolerance: tolerance.abs(),
        }
    }
}

/// Settlement engine
///
/// Stateless apart from its configuration: every call to [`settle`] builds its
/// own working queues, so one engine can be shared across threads and a failed
/// call has no effect on later ones.
///
/// [`settle`]: SettlementEngine::settle
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine {
    config: EngineConfig,
}

impl SettlementEngine {
    /// Create a new SettlementEngine
    pub fn new(config: EngineConfig) -> Self {
        SettlementEngine { config }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Settle one session
    ///
    /// # Arguments
    ///
    /// * `participants` - The session's participants, in display order
    ///
    /// # Returns
    ///
    /// * `Ok(Settlement)` with transfers in deterministic order; empty when
    ///   there is nothing to settle
    /// * `Err(SettlementError)` if the input was rejected
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A participant is malformed or duplicated
    /// - The balances do not sum to zero within the tolerance
    /// - An amount computation overflows
    pub fn settle(&self, participants: &[Participant]) -> Result<Settlement, SettlementError> {
        validate_participants(participants, self.config.tolerance)?;

        let queues = partition(participants);
        if queues.is_empty() {
            debug!(participants = participants.len(), "nothing to settle");
            return Ok(Settlement::default());
        }

        let creditor_count = queues.creditors.len();
        let debtor_count = queues.debtors.len();
        let outcome = match_queues(queues.creditors, queues.debtors)?;

        // The validator already bounds the imbalance, so this only trips if the
        // two checks ever disagree.
        let leftover_total = outcome.leftover_total()?;
        if leftover_total > self.config.tolerance {
            return Err(SettlementError::invalid_balance_sum(
                leftover_total,
                self.config.tolerance,
            ));
        }

        debug!(
            creditors = creditor_count,
            debtors = debtor_count,
            transfers = outcome.transfers.len(),
            leftover = %leftover_total,
            "settled session"
        );

        Ok(Settlement {
            transfers: outcome.transfers,
            leftover: outcome.leftover,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audit::{transfer_count_bound, verify_settlement};
    use crate::types::Transfer;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn participants(balances: &[(&str, Decimal)]) -> Vec<Participant> {
        balances
            .iter()
            .map(|(name, balance)| Participant::new(name.to_lowercase(), *name, *balance))
            .collect()
    }

    fn triples(transfers: &[Transfer]) -> Vec<(String, String, Decimal)> {
        transfers
            .iter()
            .map(|t| (t.from.clone(), t.to.clone(), t.amount))
            .collect()
    }

    fn t(from: &str, to: &str, amount: Decimal) -> (String, String, Decimal) {
        (from.to_string(), to.to_string(), amount)
    }

    #[rstest]
    #[case::two_creditors_one_debtor(
        &[("A", dec!(30)), ("B", dec!(10)), ("C", dec!(-40))],
        vec![t("C", "A", dec!(30)), t("C", "B", dec!(10))]
    )]
    #[case::one_creditor_two_debtors(
        &[("A", dec!(20)), ("B", dec!(-10)), ("C", dec!(-10))],
        vec![t("B", "A", dec!(10)), t("C", "A", dec!(10))]
    )]
    #[case::simultaneous_exhaustion(
        &[("A", dec!(15)), ("B", dec!(-15))],
        vec![t("B", "A", dec!(15))]
    )]
    #[case::all_zero(&[("A", dec!(0)), ("B", dec!(0))], vec![])]
    #[case::empty(&[], vec![])]
    fn test_settle_scenarios(
        #[case] balances: &[(&str, Decimal)],
        #[case] expected: Vec<(String, String, Decimal)>,
    ) {
        let engine = SettlementEngine::default();
        let input = participants(balances);

        let settlement = engine.settle(&input).unwrap();

        assert_eq!(triples(&settlement.transfers), expected);
        assert!(settlement.leftover.is_empty());
        verify_settlement(&input, &settlement.transfers).unwrap();
    }

    #[test]
    fn test_settle_rejects_unbalanced_input() {
        let engine = SettlementEngine::default();
        let input = participants(&[("A", dec!(10)), ("B", dec!(-5))]);

        let result = engine.settle(&input);

        assert!(matches!(
            result.unwrap_err(),
            SettlementError::InvalidBalanceSum { .. }
        ));
    }

    #[test]
    fn test_settle_reports_leftover_within_tolerance() {
        let engine = SettlementEngine::new(EngineConfig::with_tolerance(dec!(0.01)));
        let input = participants(&[("A", dec!(10.01)), ("B", dec!(-10))]);

        let settlement = engine.settle(&input).unwrap();

        assert_eq!(triples(&settlement.transfers), vec![t("B", "A", dec!(10))]);
        assert_eq!(settlement.leftover.len(), 1);
        assert_eq!(settlement.leftover[0].display_name, "A");
        assert_eq!(settlement.leftover[0].remaining, dec!(0.01));
    }

    #[test]
    fn test_settle_is_deterministic() {
        let engine = SettlementEngine::default();
        let input = participants(&[
            ("A", dec!(12.5)),
            ("B", dec!(-3.25)),
            ("C", dec!(7)),
            ("D", dec!(-20)),
            ("E", dec!(3.75)),
        ]);

        let first = engine.settle(&input).unwrap();
        let second = engine.settle(&input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_settle_respects_count_bound() {
        let engine = SettlementEngine::default();
        let input = participants(&[
            ("A", dec!(1)),
            ("B", dec!(2)),
            ("C", dec!(3)),
            ("D", dec!(-4)),
            ("E", dec!(-2)),
        ]);

        let settlement = engine.settle(&input).unwrap();

        assert!(!settlement.transfers.is_empty());
        assert!(settlement.transfers.len() <= transfer_count_bound(&input));
        assert_eq!(settlement.total_transferred(), dec!(6));
    }

    #[test]
    fn test_failed_settle_does_not_affect_next_call() {
        let engine = SettlementEngine::default();

        let bad = participants(&[("A", dec!(1)), ("B", dec!(-2))]);
        assert!(engine.settle(&bad).is_err());

        let good = participants(&[("A", dec!(2)), ("B", dec!(-2))]);
        let settlement = engine.settle(&good).unwrap();
        assert_eq!(triples(&settlement.transfers), vec![t("B", "A", dec!(2))]);
    }

    #[test]
    fn test_with_tolerance_uses_absolute_value() {
        let config = EngineConfig::with_tolerance(dec!(-0.5));
        assert_eq!(config.tolerance, dec!(0.5));
    }
}
