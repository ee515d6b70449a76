//! Report data types.
//!
//! Reports are pure, derived value objects assembled from balance engine
//! output. They are computed on demand and never persisted as a source of
//! truth.

use chrono::NaiveDate;
use kontor_shared::types::{AccountId, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::LedgerGroup;

/// One account row in a trial balance.
///
/// The ending balance sits in its natural column: a net debit balance in
/// `debit`, a net credit balance in `credit`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    /// The account.
    pub account_id: AccountId,
    /// The account's chart code, if set.
    pub code: Option<String>,
    /// The account's display name.
    pub name: String,
    /// Ending debit balance, zero when the account nets to credit.
    pub debit: Decimal,
    /// Ending credit balance, zero when the account nets to debit.
    pub credit: Decimal,
}

/// All accounts of one ledger group in a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceGroup {
    /// The ledger group.
    pub group: LedgerGroup,
    /// Account rows in chart order.
    pub lines: Vec<TrialBalanceLine>,
    /// Sum of the group's debit column.
    pub subtotal_debit: Decimal,
    /// Sum of the group's credit column.
    pub subtotal_credit: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// The report cut-off date.
    pub as_of: NaiveDate,
    /// Report currency.
    pub currency: Currency,
    /// Account rows grouped by ledger group, in statement order.
    pub groups: Vec<TrialBalanceGroup>,
    /// Sum of all debit columns.
    pub total_debit: Decimal,
    /// Sum of all credit columns.
    pub total_credit: Decimal,
    /// Whether total debits equal total credits. A checked output
    /// property; the builder never forces it.
    pub is_balanced: bool,
}

/// One account row in a balance sheet or profit and loss section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLine {
    /// The account.
    pub account_id: AccountId,
    /// The account's chart code, if set.
    pub code: Option<String>,
    /// The account's display name.
    pub name: String,
    /// The line amount.
    pub amount: Decimal,
}

/// A list of account lines with a running total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSection {
    /// Account rows in chart order.
    pub lines: Vec<SectionLine>,
    /// Sum of the section's line amounts.
    pub total: Decimal,
}

impl ReportSection {
    /// Appends a line and updates the section total.
    pub fn push(&mut self, line: SectionLine) {
        self.total += line.amount;
        self.lines.push(line);
    }
}

/// Balance sheet report.
///
/// Equity accounts carrying an income/expense tag are excluded from the
/// equity section; their net effect travels through `current_earnings`
/// together with the revenue and expense groups, so the accounting
/// equation still closes over the reported lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// The report cut-off date.
    pub as_of: NaiveDate,
    /// Report currency.
    pub currency: Currency,
    /// Asset accounts.
    pub assets: ReportSection,
    /// Liability accounts.
    pub liabilities: ReportSection,
    /// Equity accounts, excluding income/expense-tagged ones.
    pub equity: ReportSection,
    /// Net earnings to date: revenue and expense balances plus tagged
    /// equity accounts, folded into equity as one computed line.
    pub current_earnings: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Equity section total plus current earnings.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity. A property to test,
    /// not something the builder forces.
    pub is_balanced: bool,
}

/// Profit and loss report over a period.
///
/// Line amounts are unsigned magnitudes; the sign lives in the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Report currency.
    pub currency: Currency,
    /// Revenue accounts plus income-tagged equity accounts.
    pub income: ReportSection,
    /// Expense accounts plus expense-tagged equity accounts.
    pub expenses: ReportSection,
    /// Total income minus total expenses.
    pub net_profit: Decimal,
}

/// Cash flow activity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Day-to-day trading flows.
    Operating,
    /// Purchases and disposals of long-lived assets.
    Investing,
    /// Loans, capital, and distributions.
    Financing,
}

impl Activity {
    /// Classifies a cash movement by its counter account.
    ///
    /// Name heuristics carried over from the legacy report: fixed-asset
    /// style accounts go to investing, loan/capital style accounts to
    /// financing, everything else to operating.
    #[must_use]
    pub fn classify(counter_account: &str, group: LedgerGroup) -> Self {
        const INVESTING: &[&str] = &[
            "equipment",
            "fixed asset",
            "vehicle",
            "machinery",
            "property",
            "furniture",
        ];
        const FINANCING: &[&str] = &["loan", "capital", "dividend", "share", "owner"];

        let name = counter_account.to_lowercase();
        if INVESTING.iter().any(|needle| name.contains(needle)) {
            return Self::Investing;
        }
        if FINANCING.iter().any(|needle| name.contains(needle)) {
            return Self::Financing;
        }
        match group {
            LedgerGroup::Equity => Self::Financing,
            _ => Self::Operating,
        }
    }
}

/// One cash movement observed over the reporting period.
///
/// The engine derives these from posted entries touching a cash account:
/// `amount` is the net cash delta (positive for inflows) and the counter
/// account is the entry's largest non-cash leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashMovement {
    /// The movement date.
    pub date: NaiveDate,
    /// Description carried from the journal entry.
    pub description: String,
    /// Name of the counter account driving classification.
    pub counter_account: String,
    /// Ledger group of the counter account.
    pub counter_group: LedgerGroup,
    /// Net cash delta; positive means cash came in.
    pub amount: Decimal,
}

/// One line in a cash flow activity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowItem {
    /// Movement description.
    pub description: String,
    /// Net cash delta.
    pub amount: Decimal,
}

/// A cash flow activity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySection {
    /// Movements in this bucket, oldest first.
    pub items: Vec<CashFlowItem>,
    /// Net cash flow for the bucket.
    pub total: Decimal,
}

impl ActivitySection {
    /// Appends an item and updates the bucket total.
    pub fn push(&mut self, item: CashFlowItem) {
        self.total += item.amount;
        self.items.push(item);
    }
}

/// Cash flow report over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Report currency.
    pub currency: Currency,
    /// Operating activities.
    pub operating: ActivitySection,
    /// Investing activities.
    pub investing: ActivitySection,
    /// Financing activities.
    pub financing: ActivitySection,
    /// Net change in cash: the three bucket totals summed.
    pub net_change: Decimal,
}
