//! Cached financial statements over posted snapshots.
//!
//! Every report is computed against the watermark at the moment the call
//! starts, so concurrent posting never produces a half-visible entry in a
//! statement. The watermark is part of the cache key: a cached report is
//! served only while the posted log has not moved.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use kontor_shared::config::ReportConfig;
use kontor_shared::types::AccountId;
use moka::sync::Cache;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use kontor_core::accounts::{Account, AccountRef, LedgerGroup};
use kontor_core::balance::{AccountBalance, BalanceEngine, BalanceLine, DateRange, RunningPosition};
use kontor_core::journal::Posting;
use kontor_core::reports::{
    BalanceSheet, CashFlow, CashMovement, ProfitAndLoss, ReportService, TrialBalance,
};

use crate::error::EngineError;
use crate::Ledger;

type AsOfKey = (NaiveDate, u64);
type PeriodKey = (NaiveDate, NaiveDate, u64);

/// Memoized report snapshots keyed by parameters and watermark.
#[derive(Clone)]
pub(crate) struct ReportCache {
    trial_balance: Cache<AsOfKey, Arc<TrialBalance>>,
    balance_sheet: Cache<AsOfKey, Arc<BalanceSheet>>,
    profit_and_loss: Cache<PeriodKey, Arc<ProfitAndLoss>>,
    cash_flow: Cache<PeriodKey, Arc<CashFlow>>,
}

impl ReportCache {
    pub(crate) fn new(config: &ReportConfig) -> Self {
        fn build<K, V>(config: &ReportConfig) -> Cache<K, V>
        where
            K: std::hash::Hash + Eq + Send + Sync + 'static,
            V: Clone + Send + Sync + 'static,
        {
            Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        }

        Self {
            trial_balance: build(config),
            balance_sheet: build(config),
            profit_and_loss: build(config),
            cash_flow: build(config),
        }
    }
}

impl Ledger {
    /// Builds the trial balance as of a date.
    #[must_use]
    pub fn trial_balance(&self, as_of: NaiveDate) -> Arc<TrialBalance> {
        let watermark = self.store.watermark();
        self.reports
            .trial_balance
            .get_with((as_of, watermark), || {
                debug!(%as_of, watermark, "building trial balance");
                let balances = self.balances(DateRange::up_to(as_of));
                Arc::new(ReportService::trial_balance(
                    as_of,
                    self.config.ledger.base_currency,
                    &balances,
                ))
            })
    }

    /// Builds the balance sheet as of a date.
    #[must_use]
    pub fn balance_sheet(&self, as_of: NaiveDate) -> Arc<BalanceSheet> {
        let watermark = self.store.watermark();
        self.reports
            .balance_sheet
            .get_with((as_of, watermark), || {
                debug!(%as_of, watermark, "building balance sheet");
                let balances = self.balances(DateRange::up_to(as_of));
                Arc::new(ReportService::balance_sheet(
                    as_of,
                    self.config.ledger.base_currency,
                    &balances,
                ))
            })
    }

    /// Builds the profit and loss statement for a period.
    #[must_use]
    pub fn profit_and_loss(&self, start: NaiveDate, end: NaiveDate) -> Arc<ProfitAndLoss> {
        let watermark = self.store.watermark();
        self.reports
            .profit_and_loss
            .get_with((start, end, watermark), || {
                debug!(%start, %end, watermark, "building profit and loss");
                let balances = self.balances(DateRange::between(start, end));
                Arc::new(ReportService::profit_and_loss(
                    start,
                    end,
                    self.config.ledger.base_currency,
                    &balances,
                ))
            })
    }

    /// Builds the cash flow statement for a period.
    #[must_use]
    pub fn cash_flow(&self, start: NaiveDate, end: NaiveDate) -> Arc<CashFlow> {
        let watermark = self.store.watermark();
        self.reports
            .cash_flow
            .get_with((start, end, watermark), || {
                debug!(%start, %end, watermark, "building cash flow");
                let movements = self.cash_movements(DateRange::between(start, end));
                Arc::new(ReportService::cash_flow(
                    start,
                    end,
                    self.config.ledger.base_currency,
                    &movements,
                ))
            })
    }

    /// An account's net balance from postings up to and including `as_of`.
    ///
    /// # Errors
    ///
    /// Returns an error if no account matches the reference.
    pub fn balance_as_of(
        &self,
        account_ref: &AccountRef,
        as_of: NaiveDate,
    ) -> Result<Decimal, EngineError> {
        let account = self.account(account_ref)?;
        let postings = self.posted_postings(DateRange::up_to(as_of));
        Ok(BalanceEngine::balance_as_of(&account, &postings, as_of))
    }

    /// Balance listing for one ledger group, rolled up over the hierarchy.
    #[must_use]
    pub fn balances_for_group(
        &self,
        group: LedgerGroup,
        as_of: NaiveDate,
        include_children: bool,
    ) -> Vec<BalanceLine> {
        let balances = self.balances(DateRange::up_to(as_of));
        let by_id = balances
            .into_iter()
            .map(|balance| (balance.account_id, balance))
            .collect();
        let chart = self.store.chart.read().expect("chart lock poisoned");
        BalanceEngine::group_balances(&chart, &by_id, group, include_children)
    }

    /// The running position of an account, maintained inside the commit.
    #[must_use]
    pub fn position(&self, account_id: AccountId) -> RunningPosition {
        self.store.position(account_id)
    }

    /// Per-account balances over a range, fanned out across accounts.
    fn balances(&self, range: DateRange) -> Vec<AccountBalance> {
        let accounts: Vec<Account> = {
            let chart = self.store.chart.read().expect("chart lock poisoned");
            chart.iter().cloned().collect()
        };
        let postings = self.posted_postings(range);

        accounts
            .par_iter()
            .map(|account| BalanceEngine::accumulate(account, &postings, range))
            .collect()
    }

    fn posted_postings(&self, range: DateRange) -> Vec<Posting> {
        self.store
            .snapshot()
            .iter()
            .flat_map(|entry| entry.postings.iter())
            .filter(|posting| range.contains(posting.date))
            .cloned()
            .collect()
    }

    /// Derives cash movements from posted entries touching a cash account.
    ///
    /// The movement amount is the entry's net cash delta; the counter
    /// account is its largest non-cash leg. Entries with no net cash
    /// effect (including cash-to-cash transfers) are skipped.
    fn cash_movements(&self, range: DateRange) -> Vec<CashMovement> {
        let chart = self.store.chart.read().expect("chart lock poisoned");
        let mut movements = Vec::new();

        for entry in self.store.snapshot() {
            if !range.contains(entry.entry_date) {
                continue;
            }
            let mut cash_delta = Decimal::ZERO;
            let mut counter: Option<&Posting> = None;
            for posting in &entry.postings {
                let Some(account) = chart.get(posting.account_id) else {
                    continue;
                };
                if is_cash_account(account) {
                    cash_delta += posting.signed_amount();
                } else if counter.is_none_or(|best| posting.amount > best.amount) {
                    counter = Some(posting);
                }
            }
            if cash_delta.is_zero() {
                continue;
            }
            let Some(counter) = counter else {
                continue;
            };
            let Some(counter_account) = chart.get(counter.account_id) else {
                continue;
            };
            movements.push(CashMovement {
                date: entry.entry_date,
                description: entry.description.clone(),
                counter_account: counter_account.name.clone(),
                counter_group: counter_account.group,
                amount: cash_delta,
            });
        }
        movements
    }
}

/// Cash and bank style asset accounts count as cash for the cash flow.
fn is_cash_account(account: &Account) -> bool {
    if account.group != LedgerGroup::Asset {
        return false;
    }
    let name = account.name.to_lowercase();
    name.contains("cash") || name.contains("bank")
}
