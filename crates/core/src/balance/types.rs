//! Balance domain types.

use chrono::NaiveDate;
use kontor_shared::types::{AccountId, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{Account, EquityTag, LedgerGroup};
use crate::journal::Side;

/// The side on which an account's balance is conventionally positive.
///
/// Assets and expenses grow with debits; liabilities, equity, and revenue
/// grow with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSide {
    /// Balance is debit total minus credit total.
    DebitNormal,
    /// Balance is credit total minus debit total.
    CreditNormal,
}

impl NormalSide {
    /// The normal side for a ledger group.
    #[must_use]
    pub const fn of(group: LedgerGroup) -> Self {
        if group.is_debit_normal() {
            Self::DebitNormal
        } else {
            Self::CreditNormal
        }
    }

    /// Signs a debit/credit pair by this side.
    #[must_use]
    pub fn balance(self, debit_total: Decimal, credit_total: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debit_total - credit_total,
            Self::CreditNormal => credit_total - debit_total,
        }
    }
}

/// An inclusive date range used when accumulating balances.
///
/// Either bound may be open. Reports as of a date use `up_to`; period
/// reports use `between`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date included, if bounded.
    pub start: Option<NaiveDate>,
    /// Latest date included, if bounded.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// The unbounded range covering the whole ledger.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Everything up to and including `end`.
    #[must_use]
    pub const fn up_to(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Everything from `start` through `end`, inclusive on both sides.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns true if the date falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// An account's accumulated balance over a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account.
    pub account_id: AccountId,
    /// The account's chart code, if set.
    pub code: Option<String>,
    /// The account's display name.
    pub name: String,
    /// The account's ledger group.
    pub group: LedgerGroup,
    /// Income/expense tag for legacy equity accounts.
    pub equity_tag: Option<EquityTag>,
    /// The account currency.
    pub currency: Currency,
    /// Sum of debit postings in range.
    pub debit_total: Decimal,
    /// Sum of credit postings in range.
    pub credit_total: Decimal,
    /// Net balance, signed by the account's normal side.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Creates a zero balance for an account.
    #[must_use]
    pub fn new(account: &Account) -> Self {
        Self {
            account_id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            group: account.group,
            equity_tag: account.equity_tag,
            currency: account.currency,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Adds an amount on the given side and refreshes the net balance.
    pub fn add(&mut self, side: Side, amount: Decimal) {
        match side {
            Side::Debit => self.debit_total += amount,
            Side::Credit => self.credit_total += amount,
        }
        self.balance = NormalSide::of(self.group).balance(self.debit_total, self.credit_total);
    }
}

/// A versioned per-account position, updated inside the posting commit.
///
/// Positions accelerate balance queries and carry an audit version; every
/// reported number stays derivable from the posted log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunningPosition {
    /// Lifetime debit total.
    pub debit_total: Decimal,
    /// Lifetime credit total.
    pub credit_total: Decimal,
    /// Monotonically increasing version, bumped once per posting applied.
    pub version: u64,
}

impl RunningPosition {
    /// Applies one posting amount to the position.
    pub fn apply(&mut self, side: Side, amount: Decimal) {
        match side {
            Side::Debit => self.debit_total += amount,
            Side::Credit => self.credit_total += amount,
        }
        self.version += 1;
    }

    /// The position's balance, signed by the group's normal side.
    #[must_use]
    pub fn balance(&self, group: LedgerGroup) -> Decimal {
        NormalSide::of(group).balance(self.debit_total, self.credit_total)
    }
}

/// One line in a group balance listing.
///
/// `own` covers the account's postings only; `rolled_up` adds every
/// descendant's rolled-up balance. The two are equal for leaf accounts.
/// Roll-up is presentational: each account still appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    /// The account.
    pub account_id: AccountId,
    /// The account's chart code, if set.
    pub code: Option<String>,
    /// The account's display name.
    pub name: String,
    /// Depth below the group's roots (roots are 0).
    pub depth: usize,
    /// The account's own balance.
    pub own: Decimal,
    /// Own balance plus all descendants' balances.
    pub rolled_up: Decimal,
}
