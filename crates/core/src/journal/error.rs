//! Journal error types for validation and state errors.
//!
//! This module defines all errors that can occur during journal operations,
//! including entry validation errors, account errors, and lifecycle state
//! errors.

use kontor_shared::types::{AccountId, Currency, EntryId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Entry must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// Number of lines supplied.
        count: usize,
    },

    /// Entry is not balanced (debits != credits).
    #[error("Entry is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line {line} amount cannot be zero")]
    ZeroAmount {
        /// Zero-based index of the offending line.
        line: usize,
    },

    /// Line amount cannot be negative.
    #[error("Line {line} amount cannot be negative: {amount}")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        line: usize,
        /// The negative amount supplied.
        amount: Decimal,
    },

    /// Line amount has more decimal places than the currency allows.
    #[error("Line {line} amount {amount} exceeds {currency} precision")]
    PrecisionExceeded {
        /// Zero-based index of the offending line.
        line: usize,
        /// The over-precise amount supplied.
        amount: Decimal,
        /// The entry currency.
        currency: Currency,
    },

    /// Entry must contain both debit and credit lines.
    #[error("Entry must contain both debit and credit lines")]
    SingleSided,

    // ========== Account Errors ==========
    /// Referenced account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is archived and cannot accept postings.
    #[error("Account {account_id} is archived")]
    AccountArchived {
        /// The archived account.
        account_id: AccountId,
    },

    /// Account currency does not match the entry currency.
    #[error("Account {account_id} is kept in {found}, entry is in {expected}")]
    CurrencyMismatch {
        /// The mismatched account.
        account_id: AccountId,
        /// Currency the entry is denominated in.
        expected: Currency,
        /// Currency the account is kept in.
        found: Currency,
    },

    // ========== State Errors ==========
    /// Entry has already been posted.
    #[error("Entry {entry_id} is already posted")]
    AlreadyPosted {
        /// The posted entry.
        entry_id: EntryId,
    },

    /// Entry has already been reversed.
    #[error("Entry {entry_id} is already reversed")]
    AlreadyReversed {
        /// The reversed entry.
        entry_id: EntryId,
    },

    /// Entry is not posted, so it cannot be reversed.
    #[error("Entry {entry_id} is not posted")]
    NotPosted {
        /// The entry in question.
        entry_id: EntryId,
    },

    /// Entry not found.
    #[error("Entry not found: {entry_id}")]
    EntryNotFound {
        /// The missing entry.
        entry_id: EntryId,
    },
}

impl JournalError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines { .. } => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount { .. } => "ZERO_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::PrecisionExceeded { .. } => "PRECISION_EXCEEDED",
            Self::SingleSided => "SINGLE_SIDED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountArchived { .. } => "ACCOUNT_ARCHIVED",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::AlreadyPosted { .. } => "ALREADY_POSTED",
            Self::AlreadyReversed { .. } => "ALREADY_REVERSED",
            Self::NotPosted { .. } => "NOT_POSTED",
            Self::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
        }
    }
}
