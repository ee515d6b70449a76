//! Error types for voucher workflow operations.

use kontor_shared::types::VoucherId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::VoucherState;

/// Errors that can occur during voucher operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    // ========== Workflow Errors ==========
    /// The requested state transition is not allowed.
    #[error("Invalid voucher transition from {from} to {to}")]
    InvalidTransition {
        /// The current state.
        from: VoucherState,
        /// The requested target state.
        to: VoucherState,
    },

    /// Cancelling a voucher requires a reason.
    #[error("Cancellation reason is required")]
    CancelReasonRequired,

    // ========== Validation Errors ==========
    /// Voucher amount cannot be zero.
    #[error("Voucher amount cannot be zero")]
    ZeroAmount,

    /// Voucher amount cannot be negative.
    #[error("Voucher amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Cash and offset accounts must differ.
    #[error("Cash and offset accounts must be different")]
    SameAccount,

    // ========== Lookup Errors ==========
    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    NotFound(VoucherId),
}

impl VoucherError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_VOUCHER_TRANSITION",
            Self::CancelReasonRequired => "CANCEL_REASON_REQUIRED",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::SameAccount => "SAME_ACCOUNT",
            Self::NotFound(_) => "VOUCHER_NOT_FOUND",
        }
    }
}
