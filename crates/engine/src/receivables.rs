//! Open items, settlements, and aging on the ledger facade.

use chrono::NaiveDate;
use kontor_shared::types::{AccountId, Money, OpenItemId, VoucherId};
use rust_decimal::Decimal;
use tracing::info;

use kontor_core::aging::{AgingReport, AgingService, OpenItem, OpenItemError, OpenItemKind};
use kontor_core::voucher::{Counterparty, Voucher, VoucherKind};

use crate::error::EngineError;
use crate::vouchers::CreateVoucherInput;
use crate::Ledger;

/// Input for registering an open receivable or payable.
#[derive(Debug, Clone)]
pub struct RegisterItemInput {
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// The counterparty the item is with.
    pub counterparty: Counterparty,
    /// When the underlying document was issued.
    pub issue_date: NaiveDate,
    /// When payment falls due.
    pub due_date: NaiveDate,
    /// The document total (must be positive).
    pub total: Decimal,
    /// Document reference (e.g., invoice number).
    pub reference: Option<String>,
}

impl Ledger {
    /// Registers a new open item at its full outstanding amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the total is not positive.
    pub fn register_open_item(&self, input: RegisterItemInput) -> Result<OpenItem, EngineError> {
        if input.total.is_zero() {
            return Err(OpenItemError::ZeroAmount.into());
        }
        if input.total < Decimal::ZERO {
            return Err(OpenItemError::NegativeAmount(input.total).into());
        }

        let mut item = OpenItem::new(
            input.kind,
            input.counterparty,
            input.issue_date,
            input.due_date,
            input.total,
            self.config.ledger.base_currency,
        );
        if let Some(reference) = input.reference {
            item = item.with_reference(reference);
        }
        self.store.open_items.insert(item.id, item.clone());
        info!(item_id = %item.id, total = %item.total, "open item registered");
        Ok(item)
    }

    /// Applies a payment against an open item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is unknown, the payment is not
    /// positive or in the item currency, or it exceeds the outstanding
    /// balance.
    pub fn settle_open_item(
        &self,
        id: OpenItemId,
        payment: Money,
        date: NaiveDate,
        voucher_id: Option<VoucherId>,
    ) -> Result<OpenItem, EngineError> {
        let mut item = self
            .store
            .open_items
            .get_mut(&id)
            .ok_or(OpenItemError::NotFound(id))?;
        item.apply_settlement(payment, date, voucher_id)?;
        info!(item_id = %id, amount = %payment.amount, outstanding = %item.outstanding, "open item settled");
        Ok(item.value().clone())
    }

    /// Settles an open item through a posted cash voucher.
    ///
    /// A receivable settlement books a receipt (cash in); a payable
    /// settlement books a payment (cash out). The voucher runs the full
    /// workflow and the settlement carries its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is unknown, the settlement amount is
    /// invalid, or the voucher cannot be created or posted.
    pub fn settle_with_voucher(
        &self,
        id: OpenItemId,
        cash_account: AccountId,
        offset_account: AccountId,
        payment: Money,
        date: NaiveDate,
    ) -> Result<(OpenItem, Voucher), EngineError> {
        let (kind, counterparty, currency, outstanding, reference) = {
            let item = self
                .store
                .open_items
                .get(&id)
                .ok_or(OpenItemError::NotFound(id))?;
            (
                item.kind,
                item.counterparty,
                item.currency,
                item.outstanding,
                item.reference.clone(),
            )
        };
        // Checked again inside apply_settlement; failing before the
        // voucher posts keeps the ledger free of orphan cash entries.
        let remaining = Money::new(outstanding, currency)
            .checked_sub(payment)
            .map_err(OpenItemError::from)?;
        if remaining.is_negative() {
            return Err(OpenItemError::Overpayment {
                outstanding,
                amount: payment.amount,
            }
            .into());
        }

        let voucher_kind = match kind {
            OpenItemKind::Receivable => VoucherKind::Receipt,
            OpenItemKind::Payable => VoucherKind::Payment,
        };
        let voucher = self.create_voucher(CreateVoucherInput {
            kind: voucher_kind,
            number: None,
            date,
            counterparty: Some(counterparty),
            cash_account,
            offset_account,
            amount: payment.amount,
            currency: Some(payment.currency),
            memo: reference.map(|r| format!("settlement of {r}")),
        })?;
        self.approve_voucher(voucher.id, None)?;
        let voucher = self.post_voucher(voucher.id)?;

        let item = self.settle_open_item(id, payment, date, Some(voucher.id))?;
        Ok((item, voucher))
    }

    /// Looks up an open item.
    #[must_use]
    pub fn open_item(&self, id: OpenItemId) -> Option<OpenItem> {
        self.store.open_items.get(&id).map(|i| i.value().clone())
    }

    /// All open items of one kind, earliest due first.
    #[must_use]
    pub fn open_items(&self, kind: OpenItemKind) -> Vec<OpenItem> {
        let mut items: Vec<OpenItem> = self
            .store
            .open_items
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.value().clone())
            .collect();
        items.sort_by_key(|item| item.due_date);
        items
    }

    /// Ages outstanding items of one kind as of a report date.
    #[must_use]
    pub fn aging(&self, kind: OpenItemKind, as_of: NaiveDate) -> AgingReport {
        let items: Vec<OpenItem> = self
            .store
            .open_items
            .iter()
            .map(|i| i.value().clone())
            .collect();
        AgingService::age(kind, &items, as_of)
    }
}
