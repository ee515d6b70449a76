//! Chart of accounts.
//!
//! This module implements the account hierarchy:
//! - Account domain types and ledger groups
//! - The validated account tree with code and parent indexes
//! - Error types for chart maintenance

pub mod error;
pub mod tree;
pub mod types;

pub use error::AccountError;
pub use tree::AccountTree;
pub use types::{Account, AccountRef, EquityTag, LedgerGroup};
