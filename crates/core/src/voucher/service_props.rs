//! Property-based tests for the voucher workflow state machine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use kontor_shared::types::AccountId;

use super::error::VoucherError;
use super::service::VoucherService;
use super::types::{VoucherKind, VoucherState};
use crate::journal::{validate_lines, Side};

/// Strategy to generate any voucher state.
fn state_strategy() -> impl Strategy<Value = VoucherState> {
    prop_oneof![
        Just(VoucherState::Draft),
        Just(VoucherState::Approved),
        Just(VoucherState::Posted),
        Just(VoucherState::Cancelled),
    ]
}

/// Strategy to generate any voucher kind.
fn kind_strategy() -> impl Strategy<Value = VoucherKind> {
    prop_oneof![
        Just(VoucherKind::Payment),
        Just(VoucherKind::Receipt),
        Just(VoucherKind::Deposit),
    ]
}

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The approve/post/cancel services agree with the transition table:
    /// every accepted action lands on a valid transition and every invalid
    /// pair is rejected.
    #[test]
    fn prop_services_agree_with_transition_table(from in state_strategy()) {
        let approve = VoucherService::approve(from, None);
        prop_assert_eq!(
            approve.is_ok(),
            VoucherService::is_valid_transition(from, VoucherState::Approved)
        );

        let post = VoucherService::post(from);
        prop_assert_eq!(
            post.is_ok(),
            VoucherService::is_valid_transition(from, VoucherState::Posted)
        );

        let cancel = VoucherService::cancel(from, "reason".to_string());
        prop_assert_eq!(
            cancel.is_ok(),
            VoucherService::is_valid_transition(from, VoucherState::Cancelled)
        );
    }

    /// Terminal states accept no transition at all.
    #[test]
    fn prop_terminal_states_are_final(
        from in state_strategy(),
        to in state_strategy(),
    ) {
        prop_assume!(from.is_terminal());
        prop_assert!(!VoucherService::is_valid_transition(from, to));
    }

    /// No transition ever targets Draft: vouchers never move backwards.
    #[test]
    fn prop_no_transition_back_to_draft(from in state_strategy()) {
        prop_assert!(!VoucherService::is_valid_transition(from, VoucherState::Draft));
    }

    /// Cancelling with a blank reason is rejected regardless of state.
    #[test]
    fn prop_blank_cancel_reason_rejected(
        from in state_strategy(),
        padding in " {0,5}",
    ) {
        let result = VoucherService::cancel(from, padding);
        prop_assert!(matches!(result, Err(VoucherError::CancelReasonRequired)));
    }

    /// For any kind and positive amount, the built lines form a balanced
    /// two-sided entry with the cash account on the kind's cash side.
    #[test]
    fn prop_built_lines_always_balance(
        kind in kind_strategy(),
        amount in positive_amount(),
    ) {
        let cash = AccountId::new();
        let offset = AccountId::new();
        let lines = VoucherService::build_lines(kind, cash, offset, amount, None).unwrap();

        prop_assert!(validate_lines(&lines).is_ok());
        prop_assert_eq!(lines[0].side, kind.cash_side());
        prop_assert_eq!(lines[1].side, kind.cash_side().flip());
        prop_assert_eq!(lines[0].amount, amount);
        prop_assert_eq!(lines[1].amount, amount);
    }

    /// Receipts and deposits always debit cash; payments always credit it.
    #[test]
    fn prop_cash_side_matches_direction(kind in kind_strategy()) {
        let expected = match kind {
            VoucherKind::Receipt | VoucherKind::Deposit => Side::Debit,
            VoucherKind::Payment => Side::Credit,
        };
        prop_assert_eq!(kind.cash_side(), expected);
    }
}
