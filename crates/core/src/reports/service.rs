//! Financial statement assembly.
//!
//! The builders consume balance engine output and produce report value
//! objects. They never adjust figures to balance: `is_balanced` flags are
//! computed from the inputs and reported as-is. An empty ledger yields
//! zero totals and empty line lists, never an error.

use chrono::NaiveDate;
use kontor_shared::types::Currency;
use rust_decimal::Decimal;

use super::types::{
    Activity, ActivitySection, BalanceSheet, CashFlow, CashFlowItem, CashMovement, ProfitAndLoss,
    ReportSection, SectionLine, TrialBalance, TrialBalanceGroup, TrialBalanceLine,
};
use crate::accounts::{EquityTag, LedgerGroup};
use crate::balance::AccountBalance;

/// Stateless builders for the four financial statements.
pub struct ReportService;

impl ReportService {
    /// Builds a trial balance from ending account balances.
    ///
    /// Accounts with no postings are skipped. Rows sort by code then name
    /// inside each ledger group; groups come out in statement order.
    #[must_use]
    pub fn trial_balance(
        as_of: NaiveDate,
        currency: Currency,
        balances: &[AccountBalance],
    ) -> TrialBalance {
        let mut groups = Vec::new();
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for group in LedgerGroup::all() {
            let mut members: Vec<&AccountBalance> = balances
                .iter()
                .filter(|b| b.group == group && !(b.debit_total.is_zero() && b.credit_total.is_zero()))
                .collect();
            members.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));

            let mut lines = Vec::with_capacity(members.len());
            let mut subtotal_debit = Decimal::ZERO;
            let mut subtotal_credit = Decimal::ZERO;
            for member in members {
                // Net the account onto its natural column.
                let net = member.debit_total - member.credit_total;
                let (debit, credit) = if net >= Decimal::ZERO {
                    (net, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, -net)
                };
                subtotal_debit += debit;
                subtotal_credit += credit;
                lines.push(TrialBalanceLine {
                    account_id: member.account_id,
                    code: member.code.clone(),
                    name: member.name.clone(),
                    debit,
                    credit,
                });
            }

            total_debit += subtotal_debit;
            total_credit += subtotal_credit;
            groups.push(TrialBalanceGroup {
                group,
                lines,
                subtotal_debit,
                subtotal_credit,
            });
        }

        TrialBalance {
            as_of,
            currency,
            groups,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Builds a balance sheet as of a date.
    ///
    /// Revenue and expense balances, together with income/expense-tagged
    /// equity accounts, fold into the computed `current_earnings` figure
    /// rather than appearing as equity lines.
    #[must_use]
    pub fn balance_sheet(
        as_of: NaiveDate,
        currency: Currency,
        balances: &[AccountBalance],
    ) -> BalanceSheet {
        let mut assets = ReportSection::default();
        let mut liabilities = ReportSection::default();
        let mut equity = ReportSection::default();
        let mut current_earnings = Decimal::ZERO;

        for balance in Self::sorted(balances) {
            match balance.group {
                LedgerGroup::Asset => assets.push(Self::line(balance)),
                LedgerGroup::Liability => liabilities.push(Self::line(balance)),
                LedgerGroup::Equity => {
                    if balance.equity_tag.is_some() {
                        // Legacy income/expense heads under equity; their
                        // credit-normal balance is already signed as earnings.
                        current_earnings += balance.balance;
                    } else {
                        equity.push(Self::line(balance));
                    }
                }
                LedgerGroup::Revenue => current_earnings += balance.balance,
                LedgerGroup::Expense => current_earnings -= balance.balance,
            }
        }

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total + current_earnings;
        let liabilities_and_equity = total_liabilities + total_equity;

        BalanceSheet {
            as_of,
            currency,
            assets,
            liabilities,
            equity,
            current_earnings,
            total_assets,
            total_liabilities,
            total_equity,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Builds a profit and loss statement from period balances.
    ///
    /// Line amounts are unsigned magnitudes; net profit is total income
    /// minus total expenses.
    #[must_use]
    pub fn profit_and_loss(
        period_start: NaiveDate,
        period_end: NaiveDate,
        currency: Currency,
        balances: &[AccountBalance],
    ) -> ProfitAndLoss {
        let mut income = ReportSection::default();
        let mut expenses = ReportSection::default();

        for balance in Self::sorted(balances) {
            match (balance.group, balance.equity_tag) {
                (LedgerGroup::Revenue, _) | (LedgerGroup::Equity, Some(EquityTag::Income)) => {
                    income.push(Self::magnitude_line(balance));
                }
                (LedgerGroup::Expense, _) | (LedgerGroup::Equity, Some(EquityTag::Expense)) => {
                    expenses.push(Self::magnitude_line(balance));
                }
                _ => {}
            }
        }

        let net_profit = income.total - expenses.total;
        ProfitAndLoss {
            period_start,
            period_end,
            currency,
            income,
            expenses,
            net_profit,
        }
    }

    /// Builds a cash flow statement from period cash movements.
    ///
    /// Each movement lands in one activity bucket by counter-account
    /// heuristics; the net change is the three bucket totals summed.
    #[must_use]
    pub fn cash_flow(
        period_start: NaiveDate,
        period_end: NaiveDate,
        currency: Currency,
        movements: &[CashMovement],
    ) -> CashFlow {
        let mut operating = ActivitySection::default();
        let mut investing = ActivitySection::default();
        let mut financing = ActivitySection::default();

        let mut ordered: Vec<&CashMovement> = movements.iter().collect();
        ordered.sort_by_key(|m| m.date);

        for movement in ordered {
            let item = CashFlowItem {
                description: movement.description.clone(),
                amount: movement.amount,
            };
            match Activity::classify(&movement.counter_account, movement.counter_group) {
                Activity::Operating => operating.push(item),
                Activity::Investing => investing.push(item),
                Activity::Financing => financing.push(item),
            }
        }

        let net_change = operating.total + investing.total + financing.total;
        CashFlow {
            period_start,
            period_end,
            currency,
            operating,
            investing,
            financing,
            net_change,
        }
    }

    fn sorted(balances: &[AccountBalance]) -> Vec<&AccountBalance> {
        let mut sorted: Vec<&AccountBalance> = balances
            .iter()
            .filter(|b| !(b.debit_total.is_zero() && b.credit_total.is_zero()))
            .collect();
        sorted.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        sorted
    }

    fn line(balance: &AccountBalance) -> SectionLine {
        SectionLine {
            account_id: balance.account_id,
            code: balance.code.clone(),
            name: balance.name.clone(),
            amount: balance.balance,
        }
    }

    fn magnitude_line(balance: &AccountBalance) -> SectionLine {
        SectionLine {
            account_id: balance.account_id,
            code: balance.code.clone(),
            name: balance.name.clone(),
            amount: balance.balance.abs(),
        }
    }
}
