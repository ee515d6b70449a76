//! Property-based tests for journal entry validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;
use kontor_shared::types::AccountId;

use super::error::JournalError;
use super::types::{EntryLine, Side};
use super::validation::validate_lines;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy to generate a posting side.
fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

/// Helper to create an entry line for testing.
fn make_line(side: Side, amount: Decimal) -> EntryLine {
    EntryLine {
        account: AccountId::new().into(),
        side,
        amount,
        memo: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any entry with a zero-amount line, validation rejects it.
    #[test]
    fn prop_zero_amount_rejected(
        side in side_strategy(),
        other_amount in positive_amount(),
    ) {
        let lines = vec![
            make_line(side, Decimal::ZERO),
            make_line(side.flip(), other_amount),
        ];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(JournalError::ZeroAmount { line: 0 })),
            "Zero amount should be rejected, got: {:?}",
            result
        );
    }

    /// For any entry with a negative-amount line, validation rejects it.
    #[test]
    fn prop_negative_amount_rejected(
        side in side_strategy(),
        neg_amount in negative_amount(),
        other_amount in positive_amount(),
    ) {
        let lines = vec![
            make_line(side, neg_amount),
            make_line(side.flip(), other_amount),
        ];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(JournalError::NegativeAmount { line: 0, .. })),
            "Negative amount should be rejected, got: {:?}",
            result
        );
    }

    /// For any single-line entry, validation rejects it. Double-entry
    /// bookkeeping requires at least two lines.
    #[test]
    fn prop_single_line_rejected(
        side in side_strategy(),
        amount in positive_amount(),
    ) {
        let lines = vec![make_line(side, amount)];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(JournalError::InsufficientLines { count: 1 })),
            "Single line should be rejected, got: {:?}",
            result
        );
    }

    /// For any entry whose lines all sit on one side, validation rejects it
    /// even when there are enough lines.
    #[test]
    fn prop_one_sided_rejected(
        side in side_strategy(),
        amount1 in positive_amount(),
        amount2 in positive_amount(),
    ) {
        let lines = vec![make_line(side, amount1), make_line(side, amount2)];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(JournalError::SingleSided)),
            "One-sided entry should be rejected, got: {:?}",
            result
        );
    }

    /// For any pair of amounts that differ, validation rejects the entry
    /// and never adjusts it to balance.
    #[test]
    fn prop_unbalanced_rejected(
        amount1 in positive_amount(),
        amount2 in positive_amount(),
    ) {
        prop_assume!(amount1 != amount2);
        let lines = vec![
            make_line(Side::Debit, amount1),
            make_line(Side::Credit, amount2),
        ];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(
                result,
                Err(JournalError::Unbalanced { debits, credits })
                    if debits == amount1 && credits == amount2
            ),
            "Unbalanced entry should be rejected with its totals, got: {:?}",
            result
        );
    }

    /// For any positive amount, a one-debit one-credit entry of that amount
    /// is accepted.
    #[test]
    fn prop_balanced_pair_accepted(amount in positive_amount()) {
        let lines = vec![
            make_line(Side::Debit, amount),
            make_line(Side::Credit, amount),
        ];

        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// For any split of a total across several debit lines matched by one
    /// credit line, the entry is accepted.
    #[test]
    fn prop_multi_line_balanced_accepted(
        amount1 in positive_amount(),
        amount2 in positive_amount(),
    ) {
        let lines = vec![
            make_line(Side::Debit, amount1),
            make_line(Side::Debit, amount2),
            make_line(Side::Credit, amount1 + amount2),
        ];

        prop_assert!(validate_lines(&lines).is_ok());
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A 100.00 debit against a 99.00 credit must surface both totals.
    #[test]
    fn test_off_by_one_unbalanced() {
        let lines = vec![
            make_line(Side::Debit, Decimal::new(10000, 2)),
            make_line(Side::Credit, Decimal::new(9900, 2)),
        ];
        match validate_lines(&lines) {
            Err(JournalError::Unbalanced { debits, credits }) => {
                assert_eq!(debits, Decimal::new(10000, 2));
                assert_eq!(credits, Decimal::new(9900, 2));
            }
            other => panic!("expected Unbalanced, got {other:?}"),
        }
    }

    /// Minimum valid entry: one debit, one credit.
    #[test]
    fn test_minimum_valid_entry() {
        let lines = vec![
            make_line(Side::Debit, Decimal::new(100, 2)),
            make_line(Side::Credit, Decimal::new(100, 2)),
        ];
        assert!(validate_lines(&lines).is_ok());
    }
}
