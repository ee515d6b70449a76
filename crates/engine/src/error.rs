//! Engine error type aggregating the domain errors.

use thiserror::Error;

use kontor_core::accounts::AccountError;
use kontor_core::aging::OpenItemError;
use kontor_core::journal::JournalError;
use kontor_core::voucher::VoucherError;

/// Any error an engine operation can surface.
///
/// The engine never invents failure modes of its own; every variant wraps
/// a domain error from the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Chart of accounts error.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Journal entry error.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Voucher workflow error.
    #[error(transparent)]
    Voucher(#[from] VoucherError),

    /// Open item error.
    #[error(transparent)]
    OpenItem(#[from] OpenItemError),
}

impl EngineError {
    /// Returns the stable machine-readable code of the wrapped error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Account(err) => err.error_code(),
            Self::Journal(err) => err.error_code(),
            Self::Voucher(err) => err.error_code(),
            Self::OpenItem(err) => err.error_code(),
        }
    }

    /// Whether the operation lost a race with a concurrent writer.
    ///
    /// Retryable failures mean the caller acted on a stale view of the
    /// ledger; refreshing state and deciding again can succeed. Validation
    /// and workflow rule violations never clear on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Journal(JournalError::AlreadyPosted { .. })
                | Self::Journal(JournalError::AlreadyReversed { .. })
        )
    }
}
