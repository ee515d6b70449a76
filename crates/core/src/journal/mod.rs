//! Double-entry journal.
//!
//! This module implements the posting core:
//! - Entry lines, postings, and the journal entry aggregate
//! - Business rule validation for balanced entries
//! - The journal service for drafting, posting guards, and reversals
//! - Error types for journal operations

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use service::{AccountMeta, JournalService};
pub use types::{
    CreateEntryInput, EntryKind, EntryLine, EntryState, EntryTotals, JournalEntry, Posting,
    ResolvedLine, Side, ValidatedEntry,
};
pub use validation::validate_lines;
