//! Open items and aging report types.

use chrono::{DateTime, NaiveDate, Utc};
use kontor_shared::types::{Currency, Money, OpenItemId, VoucherId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::OpenItemError;
use crate::voucher::Counterparty;

/// Whether an open item is money owed to us or by us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenItemKind {
    /// A customer owes us (invoice).
    Receivable,
    /// We owe a supplier (bill).
    Payable,
}

/// Settlement status, derived from the outstanding balance.
///
/// Never stored: the settlement history is the audit trail and the status
/// is recomputed from it on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Nothing has been paid yet.
    Open,
    /// Partially paid, balance outstanding.
    Partial,
    /// Fully paid.
    Settled,
}

/// One payment applied to an open item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The amount applied.
    pub amount: Decimal,
    /// The payment date.
    pub date: NaiveDate,
    /// The voucher that moved the cash, if the payment went through one.
    pub voucher_id: Option<VoucherId>,
}

/// An open receivable or payable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenItem {
    /// Unique item identifier.
    pub id: OpenItemId,
    /// Receivable or payable.
    pub kind: OpenItemKind,
    /// The counterparty the item is with.
    pub counterparty: Counterparty,
    /// When the underlying document was issued.
    pub issue_date: NaiveDate,
    /// When payment falls due.
    pub due_date: NaiveDate,
    /// The original document total.
    pub total: Decimal,
    /// The balance still unpaid.
    pub outstanding: Decimal,
    /// The item currency.
    pub currency: Currency,
    /// Document reference (e.g., invoice number).
    pub reference: Option<String>,
    /// Payments applied so far, oldest first.
    pub settlements: Vec<Settlement>,
    /// When the item was registered.
    pub created_at: DateTime<Utc>,
}

impl OpenItem {
    /// Registers a new fully outstanding item.
    #[must_use]
    pub fn new(
        kind: OpenItemKind,
        counterparty: Counterparty,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        total: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id: OpenItemId::new(),
            kind,
            counterparty,
            issue_date,
            due_date,
            total,
            outstanding: total,
            currency,
            reference: None,
            settlements: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Sets the document reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// The derived settlement status.
    #[must_use]
    pub fn status(&self) -> SettlementStatus {
        if self.outstanding.is_zero() {
            SettlementStatus::Settled
        } else if self.outstanding < self.total {
            SettlementStatus::Partial
        } else {
            SettlementStatus::Open
        }
    }

    /// Applies a payment, reducing the outstanding balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not positive, is in a different
    /// currency than the item, or exceeds the outstanding balance.
    /// Overpayment is never absorbed silently.
    pub fn apply_settlement(
        &mut self,
        payment: Money,
        date: NaiveDate,
        voucher_id: Option<VoucherId>,
    ) -> Result<(), OpenItemError> {
        if payment.is_zero() {
            return Err(OpenItemError::ZeroAmount);
        }
        if payment.is_negative() {
            return Err(OpenItemError::NegativeAmount(payment.amount));
        }
        let remaining = Money::new(self.outstanding, self.currency).checked_sub(payment)?;
        if remaining.is_negative() {
            return Err(OpenItemError::Overpayment {
                outstanding: self.outstanding,
                amount: payment.amount,
            });
        }

        self.outstanding = remaining.amount;
        self.settlements.push(Settlement {
            amount: payment.amount,
            date,
            voucher_id,
        });
        Ok(())
    }
}

/// A time-since-due interval for classifying outstanding balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Not yet due.
    Current,
    /// Up to 30 days past due.
    Days0To30,
    /// 31 to 60 days past due.
    Days31To60,
    /// 61 to 90 days past due.
    Days61To90,
    /// More than 90 days past due.
    Over90,
}

/// Outstanding balance split across the aging buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketTotals {
    /// Not yet due.
    pub current: Decimal,
    /// Up to 30 days past due.
    pub days_0_30: Decimal,
    /// 31 to 60 days past due.
    pub days_31_60: Decimal,
    /// 61 to 90 days past due.
    pub days_61_90: Decimal,
    /// More than 90 days past due.
    pub over_90: Decimal,
}

impl BucketTotals {
    /// Adds an amount to one bucket.
    pub fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        match bucket {
            AgingBucket::Current => self.current += amount,
            AgingBucket::Days0To30 => self.days_0_30 += amount,
            AgingBucket::Days31To60 => self.days_31_60 += amount,
            AgingBucket::Days61To90 => self.days_61_90 += amount,
            AgingBucket::Over90 => self.over_90 += amount,
        }
    }

    /// Sum across all buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.current + self.days_0_30 + self.days_31_60 + self.days_61_90 + self.over_90
    }

    /// Folds another set of totals into this one.
    pub fn merge(&mut self, other: &Self) {
        self.current += other.current;
        self.days_0_30 += other.days_0_30;
        self.days_31_60 += other.days_31_60;
        self.days_61_90 += other.days_61_90;
        self.over_90 += other.over_90;
    }
}

/// One counterparty's row in an aging report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingRow {
    /// The counterparty.
    pub counterparty: Counterparty,
    /// Outstanding balances by bucket.
    pub buckets: BucketTotals,
    /// Number of open items contributing to this row.
    pub item_count: usize,
}

/// Aging report for open receivables or payables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    /// Receivable or payable side.
    pub kind: OpenItemKind,
    /// The report date buckets are measured against.
    pub as_of: NaiveDate,
    /// Per-counterparty rows.
    pub rows: Vec<AgingRow>,
    /// Grand total across all counterparties.
    pub grand_total: BucketTotals,
}
