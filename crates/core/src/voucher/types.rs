//! Voucher domain types and workflow states.
//!
//! Vouchers are the source documents for cash movements. Each voucher
//! drives exactly one journal entry: a cash line and an offset line.

use chrono::{DateTime, NaiveDate, Utc};
use kontor_shared::types::{AccountId, Currency, EntryId, PartyId, VoucherId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::journal::Side;

/// The kind of cash movement a voucher records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherKind {
    /// Cash going out (paying a vendor, staff expense).
    Payment,
    /// Cash coming in (customer receipt).
    Receipt,
    /// Cash coming in, lodged directly with the bank.
    Deposit,
}

impl VoucherKind {
    /// The side the cash account takes for this kind.
    ///
    /// Receipts and deposits bring money in, so cash is debited.
    /// Payments send money out, so cash is credited.
    #[must_use]
    pub const fn cash_side(&self) -> Side {
        match self {
            Self::Receipt | Self::Deposit => Side::Debit,
            Self::Payment => Side::Credit,
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Receipt => "receipt",
            Self::Deposit => "deposit",
        }
    }
}

impl std::fmt::Display for VoucherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voucher status in the approval workflow.
///
/// Vouchers progress through these states from creation to posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherState {
    /// Voucher is being drafted and can be modified.
    Draft,
    /// Voucher has been approved and is ready for posting.
    Approved,
    /// Voucher's entry has been posted to the ledger (immutable).
    Posted,
    /// Voucher has been cancelled before posting (immutable).
    Cancelled,
}

impl VoucherState {
    /// Returns true if the voucher can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the voucher has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Posted | Self::Cancelled)
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a state from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "approved" => Some(Self::Approved),
            "posted" => Some(Self::Posted),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for VoucherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of counterparty a voucher settles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// A customer.
    Client,
    /// A supplier.
    Vendor,
    /// An employee.
    Staff,
}

/// A counterparty reference on a voucher or open item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// What kind of party this is.
    pub kind: PartyKind,
    /// The party's identifier.
    pub id: PartyId,
}

/// A cash voucher and its workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Unique voucher identifier.
    pub id: VoucherId,
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
    /// The amount moved (always positive).
    pub amount: Decimal,
    /// The currency of the movement.
    pub currency: Currency,
    /// Optional memo.
    pub memo: Option<String>,
    /// Workflow state.
    pub state: VoucherState,
    /// The journal entry this voucher drives.
    pub entry_id: EntryId,
    /// When the voucher was created.
    pub created_at: DateTime<Utc>,
    /// When the voucher was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the voucher's entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// When the voucher was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Why the voucher was cancelled.
    pub cancel_reason: Option<String>,
}

impl Voucher {
    /// Returns true if the voucher can be approved.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        self.state == VoucherState::Draft
    }

    /// Returns true if the voucher can be posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        self.state == VoucherState::Approved
    }

    /// Returns true if the voucher can be cancelled.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        matches!(self.state, VoucherState::Draft | VoucherState::Approved)
    }
}

/// A validated workflow transition with its audit trail.
#[derive(Debug, Clone)]
pub enum VoucherAction {
    /// Draft voucher approved.
    Approve {
        /// The state after the transition.
        new_state: VoucherState,
        /// When the approval happened.
        approved_at: DateTime<Utc>,
        /// Optional notes from the approver.
        notes: Option<String>,
    },
    /// Approved voucher posted to the ledger.
    Post {
        /// The state after the transition.
        new_state: VoucherState,
        /// When the posting happened.
        posted_at: DateTime<Utc>,
    },
    /// Draft or approved voucher cancelled.
    Cancel {
        /// The state after the transition.
        new_state: VoucherState,
        /// When the cancellation happened.
        cancelled_at: DateTime<Utc>,
        /// Why the voucher was cancelled.
        cancel_reason: String,
    },
}

impl VoucherAction {
    /// The state this action transitions the voucher into.
    #[must_use]
    pub fn new_state(&self) -> VoucherState {
        match self {
            Self::Approve { new_state, .. }
            | Self::Post { new_state, .. }
            | Self::Cancel { new_state, .. } => *new_state,
        }
    }
}
