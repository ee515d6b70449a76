//! Chart of accounts operations on the ledger facade.

use kontor_shared::types::AccountId;
use tracing::info;

use kontor_core::accounts::{Account, AccountError, AccountRef};

use crate::error::EngineError;
use crate::Ledger;

impl Ledger {
    /// Adds an account to the chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken, the parent is missing, or
    /// the parent belongs to a different ledger group.
    pub fn add_account(&self, account: Account) -> Result<AccountId, EngineError> {
        let id = account.id;
        let name = account.name.clone();
        let mut chart = self.store.chart.write().expect("chart lock poisoned");
        chart.insert(account)?;
        drop(chart);
        info!(account_id = %id, name = %name, "account added");
        Ok(id)
    }

    /// Looks up an account by id or chart code.
    ///
    /// # Errors
    ///
    /// Returns an error if no account matches the reference.
    pub fn account(&self, account_ref: &AccountRef) -> Result<Account, EngineError> {
        let chart = self.store.chart.read().expect("chart lock poisoned");
        Ok(chart.resolve(account_ref)?.clone())
    }

    /// Moves an account under a new parent, or to the root.
    ///
    /// # Errors
    ///
    /// Returns an error if either account is missing, the groups differ,
    /// or the move would create a cycle.
    pub fn set_account_parent(
        &self,
        id: AccountId,
        new_parent: Option<AccountId>,
    ) -> Result<(), EngineError> {
        let mut chart = self.store.chart.write().expect("chart lock poisoned");
        chart.set_parent(id, new_parent)?;
        Ok(())
    }

    /// Archives an account so it stops accepting postings.
    ///
    /// Only untouched accounts can go: an account referenced by any posted
    /// entry stays live so its history remains reportable.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing, has active children,
    /// or appears in posted entries.
    pub fn archive_account(&self, id: AccountId) -> Result<(), EngineError> {
        let mut chart = self.store.chart.write().expect("chart lock poisoned");
        if self.store.has_postings(id) {
            return Err(AccountError::HasPostings(id).into());
        }
        chart.archive(id)?;
        drop(chart);
        info!(account_id = %id, "account archived");
        Ok(())
    }

    /// Restores an archived account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing.
    pub fn unarchive_account(&self, id: AccountId) -> Result<(), EngineError> {
        let mut chart = self.store.chart.write().expect("chart lock poisoned");
        chart.unarchive(id)?;
        Ok(())
    }

    /// All accounts in the chart, sorted by code then name.
    #[must_use]
    pub fn accounts(&self) -> Vec<Account> {
        let chart = self.store.chart.read().expect("chart lock poisoned");
        let mut accounts: Vec<Account> = chart.iter().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        accounts
    }

    /// Direct children of an account.
    #[must_use]
    pub fn child_accounts(&self, id: AccountId) -> Vec<Account> {
        let chart = self.store.chart.read().expect("chart lock poisoned");
        chart
            .children_of(id)
            .iter()
            .filter_map(|child| chart.get(*child).cloned())
            .collect()
    }
}
