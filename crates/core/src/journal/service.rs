//! Journal service for entry validation, drafting, and reversal.
//!
//! This module provides the core business logic for validating journal
//! entries before they reach the posted log, and for constructing the
//! mirror entries used to reverse posted ones.

use chrono::{NaiveDate, Utc};
use kontor_shared::types::{AccountId, Currency, EntryId, PostingId};
use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{
    CreateEntryInput, EntryKind, EntryState, EntryTotals, JournalEntry, Posting, ResolvedLine,
    Side, ValidatedEntry,
};
use super::validation::validate_lines;
use crate::accounts::AccountRef;

/// Information about an account needed for entry validation.
#[derive(Debug, Clone)]
pub struct AccountMeta {
    /// The account id.
    pub id: AccountId,
    /// The currency the account is kept in.
    pub currency: Currency,
    /// Whether the account is archived.
    pub archived: bool,
}

/// Journal service for entry validation and resolution.
///
/// This service contains pure business logic with no storage dependencies.
/// Account lookups are injected as closures so the caller decides where
/// the chart of accounts lives.
pub struct JournalService;

impl JournalService {
    /// Validate an entry input and resolve its account references.
    ///
    /// Structural rules (line count, positive amounts, both sides present,
    /// debits equal credits) come from [`validate_lines`]; this adds the
    /// checks that need account metadata: currency precision, archived
    /// accounts, and currency mismatches.
    ///
    /// The entry is never adjusted to balance. An out-of-balance input is
    /// always rejected.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` if validation fails.
    pub fn validate_and_resolve<A>(
        input: &CreateEntryInput,
        base_currency: Currency,
        resolve_account: A,
    ) -> Result<ValidatedEntry, JournalError>
    where
        A: Fn(&AccountRef) -> Result<AccountMeta, JournalError>,
    {
        validate_lines(&input.lines)?;

        let currency = input.currency.unwrap_or(base_currency);
        let mut resolved = Vec::with_capacity(input.lines.len());

        for (index, line) in input.lines.iter().enumerate() {
            if line.amount.normalize().scale() > currency.decimal_places() {
                return Err(JournalError::PrecisionExceeded {
                    line: index,
                    amount: line.amount,
                    currency,
                });
            }

            let account = resolve_account(&line.account)?;
            if account.archived {
                return Err(JournalError::AccountArchived {
                    account_id: account.id,
                });
            }
            if account.currency != currency {
                return Err(JournalError::CurrencyMismatch {
                    account_id: account.id,
                    expected: currency,
                    found: account.currency,
                });
            }

            resolved.push(ResolvedLine {
                account_id: account.id,
                side: line.side,
                amount: line.amount,
                memo: line.memo.clone(),
            });
        }

        let totals = Self::calculate_totals(&resolved);

        Ok(ValidatedEntry {
            currency,
            lines: resolved,
            totals,
        })
    }

    /// Calculate entry totals from resolved lines.
    #[must_use]
    pub fn calculate_totals(lines: &[ResolvedLine]) -> EntryTotals {
        let total_debit: Decimal = lines
            .iter()
            .filter(|l| l.side == Side::Debit)
            .map(|l| l.amount)
            .sum();
        let total_credit: Decimal = lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .sum();

        EntryTotals::new(total_debit, total_credit)
    }

    /// Builds a pending journal entry from a validated input.
    #[must_use]
    pub fn draft_entry(input: &CreateEntryInput, validated: &ValidatedEntry) -> JournalEntry {
        let entry_id = EntryId::new();
        let postings = validated
            .lines
            .iter()
            .map(|line| Posting {
                id: PostingId::new(),
                entry_id,
                account_id: line.account_id,
                date: input.entry_date,
                side: line.side,
                amount: line.amount,
                memo: line.memo.clone(),
            })
            .collect();

        JournalEntry {
            id: entry_id,
            kind: input.kind,
            entry_date: input.entry_date,
            description: input.description.clone(),
            reference: input.reference.clone(),
            currency: validated.currency,
            state: EntryState::Pending,
            postings,
            seq: None,
            reversal_of: None,
            reversed_by: None,
            created_at: Utc::now(),
            posted_at: None,
            reversed_at: None,
        }
    }

    /// Validate that an entry can still be modified or discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is posted or reversed.
    pub fn validate_can_modify(entry: &JournalEntry) -> Result<(), JournalError> {
        match entry.state {
            EntryState::Posted => Err(JournalError::AlreadyPosted { entry_id: entry.id }),
            EntryState::Reversed => Err(JournalError::AlreadyReversed { entry_id: entry.id }),
            EntryState::Pending => Ok(()),
        }
    }

    /// Validate that an entry can be posted.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not pending or does not balance.
    pub fn validate_can_post(entry: &JournalEntry) -> Result<(), JournalError> {
        Self::validate_can_modify(entry)?;
        if !entry.is_balanced() {
            return Err(JournalError::Unbalanced {
                debits: entry.total_debit(),
                credits: entry.total_credit(),
            });
        }
        Ok(())
    }

    /// Builds the pending mirror entry that reverses a posted entry.
    ///
    /// Every posting is flipped to the opposite side with the same amount,
    /// so posting the mirror restores each account to its prior balance.
    /// The original entry is never mutated.
    ///
    /// # Errors
    ///
    /// Returns an error if the original is not posted or was already reversed.
    pub fn build_reversal(
        original: &JournalEntry,
        entry_date: NaiveDate,
        reason: &str,
    ) -> Result<JournalEntry, JournalError> {
        match original.state {
            EntryState::Pending => {
                return Err(JournalError::NotPosted {
                    entry_id: original.id,
                });
            }
            EntryState::Reversed => {
                return Err(JournalError::AlreadyReversed {
                    entry_id: original.id,
                });
            }
            EntryState::Posted => {}
        }
        if original.reversed_by.is_some() {
            return Err(JournalError::AlreadyReversed {
                entry_id: original.id,
            });
        }

        let entry_id = EntryId::new();
        let postings = original
            .postings
            .iter()
            .map(|posting| Posting {
                id: PostingId::new(),
                entry_id,
                account_id: posting.account_id,
                date: entry_date,
                side: posting.side.flip(),
                amount: posting.amount,
                memo: Some(format!(
                    "Reversal: {}",
                    posting.memo.as_deref().unwrap_or(&original.description)
                )),
            })
            .collect();

        Ok(JournalEntry {
            id: entry_id,
            kind: EntryKind::Reversal,
            entry_date,
            description: format!("Reversal of entry {}. Reason: {}", original.id, reason),
            reference: original.reference.clone(),
            currency: original.currency,
            state: EntryState::Pending,
            postings,
            seq: None,
            reversal_of: Some(original.id),
            reversed_by: None,
            created_at: Utc::now(),
            posted_at: None,
            reversed_at: None,
        })
    }

    /// Validates that a mirror entry exactly undoes its original.
    ///
    /// # Errors
    ///
    /// Returns an error if the mirror does not balance or its totals differ
    /// from the original's.
    pub fn validate_reversal(
        original: &JournalEntry,
        mirror: &JournalEntry,
    ) -> Result<(), JournalError> {
        if !mirror.is_balanced() {
            return Err(JournalError::Unbalanced {
                debits: mirror.total_debit(),
                credits: mirror.total_credit(),
            });
        }
        if mirror.total_debit() != original.total_credit()
            || mirror.total_credit() != original.total_debit()
        {
            return Err(JournalError::Unbalanced {
                debits: mirror.total_debit(),
                credits: mirror.total_credit(),
            });
        }
        Ok(())
    }
}
