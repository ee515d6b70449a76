//! Concurrent in-memory ledger storage.
//!
//! The store keeps the chart of accounts behind a read/write lock, drafts
//! and vouchers in concurrent maps, and posted entries in an append-only
//! log of shared pointers. Posting takes the per-account mutexes of every
//! touched account in sorted id order, so two commits can only contend
//! when they share an account and can never deadlock.
//!
//! A watermark counts the entries visible to readers. It is advanced under
//! the log's write lock after the entry and its running positions are in
//! place, so a snapshot taken at watermark `n` always sees `n` fully
//! committed entries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use kontor_shared::types::{AccountId, EntryId, OpenItemId, VoucherId};

use kontor_core::accounts::AccountTree;
use kontor_core::aging::OpenItem;
use kontor_core::balance::RunningPosition;
use kontor_core::journal::{EntryState, JournalEntry, JournalError, JournalService};
use kontor_core::voucher::Voucher;

pub(crate) struct LedgerStore {
    pub(crate) chart: RwLock<AccountTree>,
    pub(crate) drafts: DashMap<EntryId, JournalEntry>,
    pub(crate) vouchers: DashMap<VoucherId, Voucher>,
    pub(crate) open_items: DashMap<OpenItemId, OpenItem>,
    positions: DashMap<AccountId, RunningPosition>,
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
    posted: RwLock<Vec<Arc<JournalEntry>>>,
    posted_index: DashMap<EntryId, u64>,
    watermark: AtomicU64,
}

impl LedgerStore {
    pub(crate) fn new() -> Self {
        Self {
            chart: RwLock::new(AccountTree::new()),
            drafts: DashMap::new(),
            vouchers: DashMap::new(),
            open_items: DashMap::new(),
            positions: DashMap::new(),
            locks: DashMap::new(),
            posted: RwLock::new(Vec::new()),
            posted_index: DashMap::new(),
            watermark: AtomicU64::new(0),
        }
    }

    /// Number of entries visible to snapshot readers.
    pub(crate) fn watermark(&self) -> u64 {
        self.watermark.load(Ordering::Acquire)
    }

    /// The posted entries up to the current watermark.
    pub(crate) fn snapshot(&self) -> Vec<Arc<JournalEntry>> {
        let mark = usize::try_from(self.watermark()).unwrap_or(usize::MAX);
        let log = self.posted.read().expect("posted log lock poisoned");
        log[..mark.min(log.len())].to_vec()
    }

    /// Looks up a posted entry by id.
    pub(crate) fn posted_entry(&self, id: EntryId) -> Option<Arc<JournalEntry>> {
        let seq = *self.posted_index.get(&id)?;
        let log = self.posted.read().expect("posted log lock poisoned");
        log.get(usize::try_from(seq).ok()?).cloned()
    }

    pub(crate) fn is_posted(&self, id: EntryId) -> bool {
        self.posted_index.contains_key(&id)
    }

    /// True once any posted entry has touched the account.
    pub(crate) fn has_postings(&self, account_id: AccountId) -> bool {
        self.positions.contains_key(&account_id)
    }

    /// The running position of an account, zero if it never saw a posting.
    pub(crate) fn position(&self, account_id: AccountId) -> RunningPosition {
        self.positions
            .get(&account_id)
            .map(|p| *p)
            .unwrap_or_default()
    }

    fn lock_for(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn acquire_account_locks<'a>(
        handles: &'a [Arc<Mutex<()>>],
    ) -> Vec<MutexGuard<'a, ()>> {
        handles
            .iter()
            .map(|lock| lock.lock().expect("account lock poisoned"))
            .collect()
    }

    /// Appends a pending entry to the posted log.
    ///
    /// The caller has already validated the entry. Account ids come out of
    /// `account_ids()` sorted, which fixes the lock order.
    pub(crate) fn commit(&self, mut entry: JournalEntry) -> Arc<JournalEntry> {
        let handles: Vec<Arc<Mutex<()>>> = entry
            .account_ids()
            .into_iter()
            .map(|id| self.lock_for(id))
            .collect();
        let _guards = Self::acquire_account_locks(&handles);

        let mut log = self.posted.write().expect("posted log lock poisoned");
        let seq = log.len() as u64;
        entry.state = EntryState::Posted;
        entry.seq = Some(seq);
        entry.posted_at = Some(Utc::now());

        for posting in &entry.postings {
            self.positions
                .entry(posting.account_id)
                .or_default()
                .apply(posting.side, posting.amount);
        }

        let entry = Arc::new(entry);
        self.posted_index.insert(entry.id, seq);
        log.push(Arc::clone(&entry));
        self.watermark.store(seq + 1, Ordering::Release);
        entry
    }

    /// Reverses a posted entry by committing its mirror and linking the two.
    ///
    /// The whole sequence runs under the original's account locks, so a
    /// second reversal of the same entry blocks until the first has linked
    /// `reversed_by` and then fails the state check.
    pub(crate) fn commit_reversal(
        &self,
        original_id: EntryId,
        entry_date: NaiveDate,
        reason: &str,
    ) -> Result<Arc<JournalEntry>, JournalError> {
        let seq = *self
            .posted_index
            .get(&original_id)
            .ok_or(JournalError::EntryNotFound {
                entry_id: original_id,
            })?;
        let index = usize::try_from(seq).map_err(|_| JournalError::EntryNotFound {
            entry_id: original_id,
        })?;

        let account_ids = {
            let log = self.posted.read().expect("posted log lock poisoned");
            log.get(index)
                .ok_or(JournalError::EntryNotFound {
                    entry_id: original_id,
                })?
                .account_ids()
        };
        let handles: Vec<Arc<Mutex<()>>> = account_ids
            .into_iter()
            .map(|id| self.lock_for(id))
            .collect();
        let _guards = Self::acquire_account_locks(&handles);

        let mut log = self.posted.write().expect("posted log lock poisoned");
        let original = Arc::clone(&log[index]);

        // Re-checked under the locks; a racing reversal may have won.
        let mut mirror = JournalService::build_reversal(&original, entry_date, reason)?;
        JournalService::validate_reversal(&original, &mirror)?;

        let mirror_seq = log.len() as u64;
        mirror.state = EntryState::Posted;
        mirror.seq = Some(mirror_seq);
        mirror.posted_at = Some(Utc::now());
        for posting in &mirror.postings {
            self.positions
                .entry(posting.account_id)
                .or_default()
                .apply(posting.side, posting.amount);
        }
        let mirror = Arc::new(mirror);
        self.posted_index.insert(mirror.id, mirror_seq);
        log.push(Arc::clone(&mirror));

        let mut updated = (*original).clone();
        updated.state = EntryState::Reversed;
        updated.reversed_by = Some(mirror.id);
        updated.reversed_at = Some(Utc::now());
        log[index] = Arc::new(updated);

        self.watermark.store(mirror_seq + 1, Ordering::Release);
        Ok(mirror)
    }
}
