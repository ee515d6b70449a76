//! Error types for open-item operations.

use kontor_shared::types::{MoneyError, OpenItemId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while settling open items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenItemError {
    // ========== Validation Errors ==========
    /// Settlement amount cannot be zero.
    #[error("Settlement amount cannot be zero")]
    ZeroAmount,

    /// Settlement amount cannot be negative.
    #[error("Settlement amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Settlement currency does not match the item currency.
    #[error(transparent)]
    Currency(#[from] MoneyError),

    /// Settlement exceeds the outstanding balance.
    #[error("Settlement of {amount} exceeds outstanding balance {outstanding}")]
    Overpayment {
        /// The remaining outstanding balance.
        outstanding: Decimal,
        /// The settlement amount offered.
        amount: Decimal,
    },

    // ========== Lookup Errors ==========
    /// Open item not found.
    #[error("Open item not found: {0}")]
    NotFound(OpenItemId),
}

impl OpenItemError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::Currency(_) => "CURRENCY_MISMATCH",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::NotFound(_) => "ITEM_NOT_FOUND",
        }
    }
}
