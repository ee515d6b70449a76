//! Journal operations on the ledger facade.

use chrono::NaiveDate;
use kontor_shared::types::EntryId;
use kontor_shared::types::{PageRequest, PageResponse};
use tracing::info;

use kontor_core::journal::{
    AccountMeta, CreateEntryInput, JournalEntry, JournalError, JournalService,
};

use crate::error::EngineError;
use crate::Ledger;

/// One page of posted entries, newest first.
pub type EntryPage = PageResponse<JournalEntry>;

impl Ledger {
    /// Validates an entry input and drafts a pending entry.
    ///
    /// The draft can still be discarded; nothing reaches the posted log
    /// until [`Ledger::post_entry`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input fails any posting rule: fewer than
    /// two lines, non-positive or over-precise amounts, unknown or
    /// archived accounts, currency mismatches, or unbalanced totals.
    pub fn create_entry(&self, input: CreateEntryInput) -> Result<JournalEntry, EngineError> {
        let chart = self.store.chart.read().expect("chart lock poisoned");
        let validated = JournalService::validate_and_resolve(
            &input,
            self.config.ledger.base_currency,
            |account_ref| {
                let account = chart
                    .resolve(account_ref)
                    .map_err(|_| JournalError::AccountNotFound(account_ref.to_string()))?;
                Ok(AccountMeta {
                    id: account.id,
                    currency: account.currency,
                    archived: account.archived,
                })
            },
        )?;
        drop(chart);

        let entry = JournalService::draft_entry(&input, &validated);
        self.store.drafts.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Posts a pending entry to the ledger.
    ///
    /// Once posted the entry is immutable and visible to every report at
    /// the next watermark.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unknown, already posted, or no
    /// longer balances.
    pub fn post_entry(&self, id: EntryId) -> Result<JournalEntry, EngineError> {
        if self.store.is_posted(id) {
            return Err(JournalError::AlreadyPosted { entry_id: id }.into());
        }
        let (_, entry) = self
            .store
            .drafts
            .remove(&id)
            .ok_or(JournalError::EntryNotFound { entry_id: id })?;

        if let Err(err) = JournalService::validate_can_post(&entry) {
            self.store.drafts.insert(entry.id, entry);
            return Err(err.into());
        }

        let posted = self.store.commit(entry);
        info!(
            entry_id = %posted.id,
            seq = posted.seq.unwrap_or_default(),
            total = %posted.total_debit(),
            "entry posted"
        );
        Ok((*posted).clone())
    }

    /// Discards a pending entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unknown or already posted.
    pub fn discard_entry(&self, id: EntryId) -> Result<(), EngineError> {
        if self.store.is_posted(id) {
            return Err(JournalError::AlreadyPosted { entry_id: id }.into());
        }
        self.store
            .drafts
            .remove(&id)
            .ok_or(JournalError::EntryNotFound { entry_id: id })?;
        Ok(())
    }

    /// Reverses a posted entry by posting its mirror.
    ///
    /// The original stays in the log marked reversed; the mirror carries
    /// `reversal_of` back to it. Returns the posted mirror.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unknown, not posted, or already
    /// reversed.
    pub fn reverse_entry(
        &self,
        id: EntryId,
        entry_date: NaiveDate,
        reason: &str,
    ) -> Result<JournalEntry, EngineError> {
        let mirror = self.store.commit_reversal(id, entry_date, reason)?;
        info!(
            entry_id = %id,
            mirror_id = %mirror.id,
            reason,
            "entry reversed"
        );
        Ok((*mirror).clone())
    }

    /// Looks up an entry, pending or posted.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<JournalEntry> {
        if let Some(posted) = self.store.posted_entry(id) {
            return Some((*posted).clone());
        }
        self.store.drafts.get(&id).map(|draft| draft.value().clone())
    }

    /// One page of posted entries, newest first.
    #[must_use]
    pub fn posted_entries(&self, page: &PageRequest) -> EntryPage {
        let snapshot = self.store.snapshot();
        let total = snapshot.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        let data: Vec<JournalEntry> = snapshot
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .map(|entry| (**entry).clone())
            .collect();
        PageResponse::new(data, page.page, page.per_page, total)
    }
}
