//! Chart of accounts domain types.

use chrono::{DateTime, Utc};
use kontor_shared::types::{AccountId, Currency};
use serde::{Deserialize, Serialize};

/// Top-level group an account belongs to.
///
/// The group decides which side of the ledger increases the account:
/// assets and expenses grow with debits, the rest grow with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerGroup {
    /// Resources owned (cash, bank, receivables, equipment).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's stake (capital, retained earnings).
    Equity,
    /// Income earned (sales, interest).
    Revenue,
    /// Costs incurred (rent, salaries).
    Expense,
}

impl LedgerGroup {
    /// Returns true if a debit increases this account's balance.
    #[must_use]
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Parses a group from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// All groups, in statement order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Asset,
            Self::Liability,
            Self::Equity,
            Self::Revenue,
            Self::Expense,
        ]
    }
}

impl std::fmt::Display for LedgerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag carried by legacy equity accounts that behave as income or expense.
///
/// Older charts sometimes file income and expense heads under equity.
/// The tag routes them into the profit and loss statement and keeps them
/// out of the balance sheet's equity listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquityTag {
    /// Behaves as revenue in reports.
    Income,
    /// Behaves as an expense in reports.
    Expense,
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Optional short code (e.g., "1010"). Unique across the chart when set.
    pub code: Option<String>,
    /// Human-readable account name.
    pub name: String,
    /// Top-level group.
    pub group: LedgerGroup,
    /// Income/expense tag for legacy equity accounts.
    pub equity_tag: Option<EquityTag>,
    /// Parent account for hierarchy roll-ups. None for root accounts.
    pub parent_id: Option<AccountId>,
    /// Currency this account is kept in.
    pub currency: Currency,
    /// Archived accounts reject new postings but keep their history.
    pub archived: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active root account.
    #[must_use]
    pub fn new(name: impl Into<String>, group: LedgerGroup, currency: Currency) -> Self {
        Self {
            id: AccountId::new(),
            code: None,
            name: name.into(),
            group,
            equity_tag: None,
            parent_id: None,
            currency,
            archived: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the account code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the parent account.
    #[must_use]
    pub fn with_parent(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the legacy equity tag.
    #[must_use]
    pub fn with_equity_tag(mut self, tag: EquityTag) -> Self {
        self.equity_tag = Some(tag);
        self
    }

    /// Returns true if new postings may target this account.
    #[must_use]
    pub fn accepts_postings(&self) -> bool {
        !self.archived
    }
}

/// Reference to an account, either by id or by its chart code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRef {
    /// Reference by unique identifier.
    ById(AccountId),
    /// Reference by chart code.
    ByCode(String),
}

impl From<AccountId> for AccountRef {
    fn from(id: AccountId) -> Self {
        Self::ById(id)
    }
}

impl std::fmt::Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ById(id) => write!(f, "{id}"),
            Self::ByCode(code) => write!(f, "code:{code}"),
        }
    }
}
