//! Voucher workflow operations on the ledger facade.

use chrono::NaiveDate;
use kontor_shared::types::{AccountId, Currency, VoucherId};
use rust_decimal::Decimal;
use tracing::info;

use kontor_core::journal::{CreateEntryInput, EntryKind};
use kontor_core::voucher::{
    Counterparty, Voucher, VoucherAction, VoucherError, VoucherKind, VoucherService, VoucherState,
};

use crate::error::EngineError;
use crate::Ledger;

/// Input for creating a cash voucher.
#[derive(Debug, Clone)]
pub struct CreateVoucherInput {
    /// The kind of cash movement.
    pub kind: VoucherKind,
    /// Optional voucher number (e.g., "PV-0042").
    pub number: Option<String>,
    /// The voucher date.
    pub date: NaiveDate,
    /// The counterparty, if any.
    pub counterparty: Option<Counterparty>,
    /// The cash or bank account moved.
    pub cash_account: AccountId,
    /// The account the movement is booked against.
    pub offset_account: AccountId,
    /// The amount moved (must be positive).
    pub amount: Decimal,
    /// Voucher currency. Falls back to the configured base currency.
    pub currency: Option<Currency>,
    /// Optional memo carried onto both journal lines.
    pub memo: Option<String>,
}

impl Ledger {
    /// Creates a draft voucher and the pending entry it drives.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive, the accounts are
    /// the same, or the drafted entry fails a posting rule.
    pub fn create_voucher(&self, input: CreateVoucherInput) -> Result<Voucher, EngineError> {
        let lines = VoucherService::build_lines(
            input.kind,
            input.cash_account,
            input.offset_account,
            input.amount,
            input.memo.as_deref(),
        )?;

        let description = match &input.memo {
            Some(memo) => format!("{} voucher: {memo}", input.kind),
            None => format!("{} voucher", input.kind),
        };
        let entry = self.create_entry(CreateEntryInput {
            kind: EntryKind::Voucher,
            entry_date: input.date,
            description,
            reference: input.number.clone(),
            currency: input.currency,
            lines,
        })?;

        let voucher = Voucher {
            id: VoucherId::new(),
            kind: input.kind,
            number: input.number,
            date: input.date,
            counterparty: input.counterparty,
            cash_account: input.cash_account,
            offset_account: input.offset_account,
            amount: input.amount,
            currency: entry.currency,
            memo: input.memo,
            state: VoucherState::Draft,
            entry_id: entry.id,
            created_at: chrono::Utc::now(),
            approved_at: None,
            posted_at: None,
            cancelled_at: None,
            cancel_reason: None,
        };
        self.store.vouchers.insert(voucher.id, voucher.clone());
        info!(voucher_id = %voucher.id, kind = %voucher.kind, amount = %voucher.amount, "voucher drafted");
        Ok(voucher)
    }

    /// Approves a draft voucher.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is unknown or not a draft.
    pub fn approve_voucher(
        &self,
        id: VoucherId,
        notes: Option<String>,
    ) -> Result<Voucher, EngineError> {
        let mut voucher = self
            .store
            .vouchers
            .get_mut(&id)
            .ok_or(VoucherError::NotFound(id))?;
        let action = VoucherService::approve(voucher.state, notes)?;
        if let VoucherAction::Approve {
            new_state,
            approved_at,
            ..
        } = action
        {
            voucher.state = new_state;
            voucher.approved_at = Some(approved_at);
        }
        info!(voucher_id = %id, "voucher approved");
        Ok(voucher.value().clone())
    }

    /// Posts an approved voucher's entry to the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is unknown, not approved, or its
    /// entry can no longer be posted.
    pub fn post_voucher(&self, id: VoucherId) -> Result<Voucher, EngineError> {
        // The guard is held across the entry post so a racing cancel
        // cannot slip between the state check and the state write.
        let mut voucher = self
            .store
            .vouchers
            .get_mut(&id)
            .ok_or(VoucherError::NotFound(id))?;
        let action = VoucherService::post(voucher.state)?;
        let entry_id = voucher.entry_id;
        self.post_entry(entry_id)?;
        if let VoucherAction::Post {
            new_state,
            posted_at,
        } = action
        {
            voucher.state = new_state;
            voucher.posted_at = Some(posted_at);
        }
        info!(voucher_id = %id, entry_id = %entry_id, "voucher posted");
        Ok(voucher.value().clone())
    }

    /// Cancels a draft or approved voucher and discards its pending entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is unknown, already posted or
    /// cancelled, or the reason is empty.
    pub fn cancel_voucher(&self, id: VoucherId, reason: String) -> Result<Voucher, EngineError> {
        let mut voucher = self
            .store
            .vouchers
            .get_mut(&id)
            .ok_or(VoucherError::NotFound(id))?;
        let action = VoucherService::cancel(voucher.state, reason)?;
        if let VoucherAction::Cancel {
            new_state,
            cancelled_at,
            cancel_reason,
        } = action
        {
            voucher.state = new_state;
            voucher.cancelled_at = Some(cancelled_at);
            voucher.cancel_reason = Some(cancel_reason);
        }
        let entry_id = voucher.entry_id;
        let cancelled = voucher.value().clone();
        drop(voucher);

        // The drafted entry goes with the voucher.
        self.store.drafts.remove(&entry_id);
        info!(voucher_id = %id, "voucher cancelled");
        Ok(cancelled)
    }

    /// Looks up a voucher.
    #[must_use]
    pub fn voucher(&self, id: VoucherId) -> Option<Voucher> {
        self.store.vouchers.get(&id).map(|v| v.value().clone())
    }

    /// All vouchers, newest first.
    #[must_use]
    pub fn vouchers(&self) -> Vec<Voucher> {
        let mut all: Vec<Voucher> = self
            .store
            .vouchers
            .iter()
            .map(|v| v.value().clone())
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}
