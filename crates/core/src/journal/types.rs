//! Journal domain types for entry creation and posting.
//!
//! This module defines the core types used for creating and validating
//! journal entries in the double-entry bookkeeping system.

use chrono::{DateTime, NaiveDate, Utc};
use kontor_shared::types::{AccountId, Currency, EntryId, PostingId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountRef;

/// Side of a posting: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn flip(&self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Journal entry classification.
///
/// Categorizes entries for listings and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// General journal entry.
    General,
    /// Entry generated from a voucher.
    Voucher,
    /// Reversal of a previously posted entry.
    Reversal,
    /// Opening balance entry.
    OpeningBalance,
}

/// Lifecycle state of a journal entry.
///
/// Entries start out pending, become immutable once posted, and can only
/// leave the ledger again through a reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    /// Entry is drafted and can still be modified or discarded.
    Pending,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been reversed by a mirror entry (immutable).
    Reversed,
}

impl EntryState {
    /// Returns true if the entry can be modified or discarded.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }

    /// Parses a state from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "posted" => Some(Self::Posted),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for a single line in a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLine {
    /// The account to post to.
    pub account: AccountRef,
    /// Whether this is a debit or credit line.
    pub side: Side,
    /// The amount (must be positive).
    pub amount: Decimal,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

impl EntryLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: impl Into<AccountRef>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            side: Side::Debit,
            amount,
            memo: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: impl Into<AccountRef>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            side: Side::Credit,
            amount,
            memo: None,
        }
    }

    /// Attaches a memo to the line.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}

/// Input for creating a new journal entry.
///
/// Contains everything needed to draft an entry with multiple lines.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Entry classification.
    pub kind: EntryKind,
    /// The effective date of the entry.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// Optional reference (e.g., invoice number).
    pub reference: Option<String>,
    /// Entry currency. Falls back to the configured base currency.
    pub currency: Option<Currency>,
    /// The entry lines (must have at least 2).
    pub lines: Vec<EntryLine>,
}

impl CreateEntryInput {
    /// Creates a general entry input with the given lines.
    #[must_use]
    pub fn general(
        entry_date: NaiveDate,
        description: impl Into<String>,
        lines: Vec<EntryLine>,
    ) -> Self {
        Self {
            kind: EntryKind::General,
            entry_date,
            description: description.into(),
            reference: None,
            currency: None,
            lines,
        }
    }
}

/// A single resolved and validated entry line.
///
/// After validation, every line's account reference has been resolved
/// to a concrete account id.
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    /// The resolved account id.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: Side,
    /// The line amount.
    pub amount: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

/// A validated entry ready to be drafted.
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    /// The currency every line is denominated in.
    pub currency: Currency,
    /// The resolved lines.
    pub lines: Vec<ResolvedLine>,
    /// Debit and credit totals.
    pub totals: EntryTotals,
}

/// One half of a double-entry pair, attached to a posted or pending entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Unique posting identifier.
    pub id: PostingId,
    /// The entry this posting belongs to.
    pub entry_id: EntryId,
    /// The account being debited or credited.
    pub account_id: AccountId,
    /// Effective date, copied from the entry.
    pub date: NaiveDate,
    /// Debit or credit.
    pub side: Side,
    /// The amount (always positive).
    pub amount: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

impl Posting {
    /// Returns the amount signed by side: debits positive, credits negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount,
            Side::Credit => -self.amount,
        }
    }
}

/// A journal entry: a balanced group of postings sharing one lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// Entry classification.
    pub kind: EntryKind,
    /// The effective date of the entry.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// Optional reference (e.g., invoice number).
    pub reference: Option<String>,
    /// Currency every posting is denominated in.
    pub currency: Currency,
    /// Lifecycle state.
    pub state: EntryState,
    /// The postings making up this entry.
    pub postings: Vec<Posting>,
    /// Position in the posted log. None until posted.
    pub seq: Option<u64>,
    /// The entry this one reverses, if any.
    pub reversal_of: Option<EntryId>,
    /// The entry that reversed this one, if any.
    pub reversed_by: Option<EntryId>,
    /// When the entry was drafted.
    pub created_at: DateTime<Utc>,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// When the entry was reversed.
    pub reversed_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    /// Sum of all debit postings.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.postings
            .iter()
            .filter(|p| p.side == Side::Debit)
            .map(|p| p.amount)
            .sum()
    }

    /// Sum of all credit postings.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.postings
            .iter()
            .filter(|p| p.side == Side::Credit)
            .map(|p| p.amount)
            .sum()
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }

    /// Returns true if the entry can be posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        self.state == EntryState::Pending
    }

    /// Returns true if the entry can be reversed.
    #[must_use]
    pub fn can_reverse(&self) -> bool {
        self.state == EntryState::Posted && self.reversed_by.is_none()
    }

    /// Returns true if the entry can be discarded.
    #[must_use]
    pub fn can_discard(&self) -> bool {
        self.state == EntryState::Pending
    }

    /// The set of accounts this entry touches.
    #[must_use]
    pub fn account_ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.postings.iter().map(|p| p.account_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates new entry totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}
