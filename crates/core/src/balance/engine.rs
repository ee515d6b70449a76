//! Balance accumulation and hierarchy roll-ups.

use std::collections::HashMap;

use chrono::NaiveDate;
use kontor_shared::types::AccountId;
use rust_decimal::Decimal;

use super::types::{AccountBalance, BalanceLine, DateRange};
use crate::accounts::{Account, AccountTree, LedgerGroup};
use crate::journal::Posting;

/// Stateless balance calculator over posted postings.
///
/// The engine only ever reads postings that have reached the posted log;
/// callers are responsible for handing it a consistent snapshot.
pub struct BalanceEngine;

impl BalanceEngine {
    /// Accumulates an account's balance from its postings over a range.
    #[must_use]
    pub fn accumulate<'a, I>(account: &Account, postings: I, range: DateRange) -> AccountBalance
    where
        I: IntoIterator<Item = &'a Posting>,
    {
        let mut balance = AccountBalance::new(account);
        for posting in postings {
            if posting.account_id == account.id && range.contains(posting.date) {
                balance.add(posting.side, posting.amount);
            }
        }
        balance
    }

    /// The account's net balance from all postings up to and including `as_of`.
    #[must_use]
    pub fn balance_as_of<'a, I>(account: &Account, postings: I, as_of: NaiveDate) -> Decimal
    where
        I: IntoIterator<Item = &'a Posting>,
    {
        Self::accumulate(account, postings, DateRange::up_to(as_of)).balance
    }

    /// An account's balance plus the rolled-up balance of every descendant.
    ///
    /// Accounts missing from `own_balances` contribute zero, so a parent
    /// with no postings of its own still rolls up its children.
    #[must_use]
    pub fn rolled_up(
        tree: &AccountTree,
        own_balances: &HashMap<AccountId, Decimal>,
        id: AccountId,
    ) -> Decimal {
        let own = own_balances.get(&id).copied().unwrap_or(Decimal::ZERO);
        tree.children_of(id)
            .iter()
            .fold(own, |sum, child| sum + Self::rolled_up(tree, own_balances, *child))
    }

    /// Lists balances for every account in a ledger group.
    ///
    /// Lines come out in chart order: roots sorted by code then name, then
    /// each subtree depth-first. With `include_children` unset only root
    /// accounts of the group are listed and their roll-ups still cover the
    /// whole subtree; with it set every descendant gets its own line. No
    /// account ever appears twice.
    #[must_use]
    pub fn group_balances(
        tree: &AccountTree,
        balances: &HashMap<AccountId, AccountBalance>,
        group: LedgerGroup,
        include_children: bool,
    ) -> Vec<BalanceLine> {
        let own: HashMap<AccountId, Decimal> = balances
            .iter()
            .map(|(id, balance)| (*id, balance.balance))
            .collect();

        let mut lines = Vec::new();
        for root in tree.roots() {
            if root.group == group {
                Self::walk(tree, &own, root.id, 0, include_children, &mut lines);
            }
        }
        lines
    }

    fn walk(
        tree: &AccountTree,
        own: &HashMap<AccountId, Decimal>,
        id: AccountId,
        depth: usize,
        include_children: bool,
        lines: &mut Vec<BalanceLine>,
    ) {
        let Some(account) = tree.get(id) else {
            return;
        };

        lines.push(BalanceLine {
            account_id: id,
            code: account.code.clone(),
            name: account.name.clone(),
            depth,
            own: own.get(&id).copied().unwrap_or(Decimal::ZERO),
            rolled_up: Self::rolled_up(tree, own, id),
        });

        if include_children {
            let mut children: Vec<&Account> = tree
                .children_of(id)
                .iter()
                .filter_map(|child| tree.get(*child))
                .collect();
            children.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
            for child in children {
                Self::walk(tree, own, child.id, depth + 1, include_children, lines);
            }
        }
    }
}
