//! Voucher workflow service for state transitions.
//!
//! This module implements the state machine for moving vouchers from
//! draft through approval to posting, and builds the journal lines a
//! voucher drives.

use chrono::Utc;
use kontor_shared::types::AccountId;
use rust_decimal::Decimal;

use super::error::VoucherError;
use super::types::{VoucherAction, VoucherKind, VoucherState};
use crate::journal::EntryLine;

/// Stateless service for managing voucher workflow transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning the appropriate `VoucherAction`
/// with audit trail information.
pub struct VoucherService;

impl VoucherService {
    /// Approve a draft voucher.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::InvalidTransition` if the voucher is not a draft.
    pub fn approve(
        current_state: VoucherState,
        notes: Option<String>,
    ) -> Result<VoucherAction, VoucherError> {
        match current_state {
            VoucherState::Draft => Ok(VoucherAction::Approve {
                new_state: VoucherState::Approved,
                approved_at: Utc::now(),
                notes,
            }),
            _ => Err(VoucherError::InvalidTransition {
                from: current_state,
                to: VoucherState::Approved,
            }),
        }
    }

    /// Post an approved voucher's entry to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::InvalidTransition` if the voucher is not approved.
    pub fn post(current_state: VoucherState) -> Result<VoucherAction, VoucherError> {
        match current_state {
            VoucherState::Approved => Ok(VoucherAction::Post {
                new_state: VoucherState::Posted,
                posted_at: Utc::now(),
            }),
            _ => Err(VoucherError::InvalidTransition {
                from: current_state,
                to: VoucherState::Posted,
            }),
        }
    }

    /// Cancel a draft or approved voucher.
    ///
    /// Posted vouchers can never be cancelled; their entries must be
    /// reversed instead.
    ///
    /// # Errors
    ///
    /// Returns `VoucherError::InvalidTransition` if the voucher is posted or
    /// already cancelled, and `VoucherError::CancelReasonRequired` if the
    /// reason is empty.
    pub fn cancel(
        current_state: VoucherState,
        cancel_reason: String,
    ) -> Result<VoucherAction, VoucherError> {
        if cancel_reason.trim().is_empty() {
            return Err(VoucherError::CancelReasonRequired);
        }

        match current_state {
            VoucherState::Draft | VoucherState::Approved => Ok(VoucherAction::Cancel {
                new_state: VoucherState::Cancelled,
                cancelled_at: Utc::now(),
                cancel_reason,
            }),
            _ => Err(VoucherError::InvalidTransition {
                from: current_state,
                to: VoucherState::Cancelled,
            }),
        }
    }

    /// Check if a state transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Approved (approve)
    /// - Approved → Posted (post)
    /// - Draft → Cancelled (cancel)
    /// - Approved → Cancelled (cancel)
    #[must_use]
    pub fn is_valid_transition(from: VoucherState, to: VoucherState) -> bool {
        matches!(
            (from, to),
            (
                VoucherState::Draft,
                VoucherState::Approved | VoucherState::Cancelled
            ) | (
                VoucherState::Approved,
                VoucherState::Posted | VoucherState::Cancelled
            )
        )
    }

    /// Builds the pair of journal lines a voucher drives.
    ///
    /// The cash account takes the side dictated by the voucher kind and the
    /// offset account takes the opposite side, so the pair always balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the accounts are
    /// the same.
    pub fn build_lines(
        kind: VoucherKind,
        cash_account: AccountId,
        offset_account: AccountId,
        amount: Decimal,
        memo: Option<&str>,
    ) -> Result<Vec<EntryLine>, VoucherError> {
        if amount.is_zero() {
            return Err(VoucherError::ZeroAmount);
        }
        if amount < Decimal::ZERO {
            return Err(VoucherError::NegativeAmount(amount));
        }
        if cash_account == offset_account {
            return Err(VoucherError::SameAccount);
        }

        let cash_side = kind.cash_side();
        let mut cash_line = EntryLine {
            account: cash_account.into(),
            side: cash_side,
            amount,
            memo: None,
        };
        let mut offset_line = EntryLine {
            account: offset_account.into(),
            side: cash_side.flip(),
            amount,
            memo: None,
        };
        if let Some(memo) = memo {
            cash_line.memo = Some(memo.to_string());
            offset_line.memo = Some(memo.to_string());
        }

        Ok(vec![cash_line, offset_line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn test_approve_from_draft() {
        let action = VoucherService::approve(VoucherState::Draft, None).unwrap();
        assert_eq!(action.new_state(), VoucherState::Approved);
        assert!(matches!(action, VoucherAction::Approve { notes: None, .. }));
    }

    #[test]
    fn test_approve_with_notes() {
        let action =
            VoucherService::approve(VoucherState::Draft, Some("looks right".to_string())).unwrap();
        match action {
            VoucherAction::Approve { notes, .. } => {
                assert_eq!(notes.as_deref(), Some("looks right"));
            }
            other => panic!("expected Approve, got {other:?}"),
        }
    }

    #[test]
    fn test_approve_rejected_from_other_states() {
        for state in [
            VoucherState::Approved,
            VoucherState::Posted,
            VoucherState::Cancelled,
        ] {
            let result = VoucherService::approve(state, None);
            assert!(matches!(
                result,
                Err(VoucherError::InvalidTransition { from, to })
                    if from == state && to == VoucherState::Approved
            ));
        }
    }

    #[test]
    fn test_post_from_approved_only() {
        let action = VoucherService::post(VoucherState::Approved).unwrap();
        assert_eq!(action.new_state(), VoucherState::Posted);

        for state in [
            VoucherState::Draft,
            VoucherState::Posted,
            VoucherState::Cancelled,
        ] {
            assert!(matches!(
                VoucherService::post(state),
                Err(VoucherError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_cancel_requires_reason() {
        let result = VoucherService::cancel(VoucherState::Draft, "   ".to_string());
        assert!(matches!(result, Err(VoucherError::CancelReasonRequired)));
    }

    #[test]
    fn test_cancel_from_draft_and_approved() {
        for state in [VoucherState::Draft, VoucherState::Approved] {
            let action = VoucherService::cancel(state, "duplicate".to_string()).unwrap();
            assert_eq!(action.new_state(), VoucherState::Cancelled);
            match action {
                VoucherAction::Cancel { cancel_reason, .. } => {
                    assert_eq!(cancel_reason, "duplicate");
                }
                other => panic!("expected Cancel, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_cancel_posted_rejected() {
        let result = VoucherService::cancel(VoucherState::Posted, "too late".to_string());
        assert!(matches!(
            result,
            Err(VoucherError::InvalidTransition {
                from: VoucherState::Posted,
                to: VoucherState::Cancelled,
            })
        ));
    }

    #[test]
    fn test_transition_table() {
        use VoucherState::{Approved, Cancelled, Draft, Posted};

        assert!(VoucherService::is_valid_transition(Draft, Approved));
        assert!(VoucherService::is_valid_transition(Draft, Cancelled));
        assert!(VoucherService::is_valid_transition(Approved, Posted));
        assert!(VoucherService::is_valid_transition(Approved, Cancelled));

        assert!(!VoucherService::is_valid_transition(Draft, Posted));
        assert!(!VoucherService::is_valid_transition(Posted, Cancelled));
        assert!(!VoucherService::is_valid_transition(Posted, Draft));
        assert!(!VoucherService::is_valid_transition(Cancelled, Draft));
        assert!(!VoucherService::is_valid_transition(Approved, Draft));
    }

    #[test]
    fn test_build_lines_receipt_debits_cash() {
        let cash = AccountId::new();
        let offset = AccountId::new();
        let lines =
            VoucherService::build_lines(VoucherKind::Receipt, cash, offset, dec!(200.00), None)
                .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].side, Side::Debit);
        assert_eq!(lines[0].account, cash.into());
        assert_eq!(lines[1].side, Side::Credit);
        assert_eq!(lines[1].account, offset.into());
        assert_eq!(lines[0].amount, lines[1].amount);
    }

    #[test]
    fn test_build_lines_payment_credits_cash() {
        let cash = AccountId::new();
        let offset = AccountId::new();
        let lines = VoucherService::build_lines(
            VoucherKind::Payment,
            cash,
            offset,
            dec!(75.50),
            Some("rent"),
        )
        .unwrap();

        assert_eq!(lines[0].side, Side::Credit);
        assert_eq!(lines[1].side, Side::Debit);
        assert_eq!(lines[0].memo.as_deref(), Some("rent"));
        assert_eq!(lines[1].memo.as_deref(), Some("rent"));
    }

    #[test]
    fn test_build_lines_rejects_bad_input() {
        let cash = AccountId::new();
        let offset = AccountId::new();

        assert!(matches!(
            VoucherService::build_lines(VoucherKind::Receipt, cash, offset, Decimal::ZERO, None),
            Err(VoucherError::ZeroAmount)
        ));
        assert!(matches!(
            VoucherService::build_lines(VoucherKind::Receipt, cash, offset, dec!(-5.00), None),
            Err(VoucherError::NegativeAmount(_))
        ));
        assert!(matches!(
            VoucherService::build_lines(VoucherKind::Receipt, cash, cash, dec!(5.00), None),
            Err(VoucherError::SameAccount)
        ));
    }
}
