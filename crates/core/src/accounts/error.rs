//! Error types for chart of accounts operations.

use kontor_shared::types::AccountId;
use thiserror::Error;

/// Errors that can occur while maintaining the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    // ========== Lookup Errors ==========
    /// Account not found by id.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Account not found by code.
    #[error("Account not found for code: {0}")]
    CodeNotFound(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    // ========== Structure Errors ==========
    /// Account code already in use.
    #[error("Duplicate account code: {0}")]
    DuplicateCode(String),

    /// Child accounts must share their parent's group.
    #[error("Account group {child_group} does not match parent group {parent_group}")]
    GroupMismatch {
        /// Group of the account being placed.
        child_group: String,
        /// Group of the intended parent.
        parent_group: String,
    },

    /// Reparenting would make the account its own ancestor.
    #[error("Moving account {account_id} under {parent_id} would create a cycle")]
    CycleDetected {
        /// The account being moved.
        account_id: AccountId,
        /// The intended new parent.
        parent_id: AccountId,
    },

    // ========== State Errors ==========
    /// Account is archived and cannot be used.
    #[error("Account {0} is archived")]
    Archived(AccountId),

    /// Account still has active children.
    #[error("Account {0} has active children and cannot be archived")]
    HasActiveChildren(AccountId),

    /// Account is referenced by posted entries.
    #[error("Account {0} has posted history and cannot be archived")]
    HasPostings(AccountId),
}

impl AccountError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CodeNotFound(_) => "ACCOUNT_CODE_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::GroupMismatch { .. } => "GROUP_MISMATCH",
            Self::CycleDetected { .. } => "CYCLE_DETECTED",
            Self::Archived(_) => "ACCOUNT_ARCHIVED",
            Self::HasActiveChildren(_) => "ACCOUNT_HAS_ACTIVE_CHILDREN",
            Self::HasPostings(_) => "ACCOUNT_HAS_POSTINGS",
        }
    }
}
