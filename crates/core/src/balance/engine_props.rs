//! Property-based tests for balance accumulation and roll-ups.

use std::collections::HashMap;

use chrono::NaiveDate;
use kontor_shared::types::{AccountId, Currency, EntryId, PostingId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::BalanceEngine;
use super::types::{DateRange, NormalSide, RunningPosition};
use crate::accounts::{Account, AccountTree, LedgerGroup};
use crate::journal::{Posting, Side};

/// Strategy for a positive posting amount in cents.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

/// Strategy for a posting day within March 2026.
fn day() -> impl Strategy<Value = u32> {
    1u32..=31
}

fn posting(account_id: AccountId, side: Side, amount: Decimal, day: u32) -> Posting {
    Posting {
        id: PostingId::new(),
        entry_id: EntryId::new(),
        account_id,
        date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
        side,
        amount,
        memo: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Accumulated totals equal the sums of the in-range postings, and the
    /// balance is those totals signed by the normal side.
    #[test]
    fn prop_accumulate_matches_posting_sums(
        movements in proptest::collection::vec((side(), amount(), day()), 0..30),
        cutoff in day(),
    ) {
        let account = Account::new("Cash", LedgerGroup::Asset, Currency::Usd);
        let postings: Vec<Posting> = movements
            .iter()
            .map(|(side, amount, day)| posting(account.id, *side, *amount, *day))
            .collect();

        let as_of = NaiveDate::from_ymd_opt(2026, 3, cutoff).unwrap();
        let balance =
            BalanceEngine::accumulate(&account, &postings, DateRange::up_to(as_of));

        let expected_debit: Decimal = postings
            .iter()
            .filter(|p| p.side == Side::Debit && p.date <= as_of)
            .map(|p| p.amount)
            .sum();
        let expected_credit: Decimal = postings
            .iter()
            .filter(|p| p.side == Side::Credit && p.date <= as_of)
            .map(|p| p.amount)
            .sum();

        prop_assert_eq!(balance.debit_total, expected_debit);
        prop_assert_eq!(balance.credit_total, expected_credit);
        prop_assert_eq!(
            balance.balance,
            NormalSide::of(account.group).balance(expected_debit, expected_credit)
        );
    }

    /// A running position fed the same movements agrees with accumulation,
    /// and its version counts the postings applied.
    #[test]
    fn prop_position_agrees_with_accumulation(
        movements in proptest::collection::vec((side(), amount()), 1..30),
    ) {
        let account = Account::new("Sales", LedgerGroup::Revenue, Currency::Usd);
        let mut position = RunningPosition::default();
        let postings: Vec<Posting> = movements
            .iter()
            .map(|(side, amount)| {
                position.apply(*side, *amount);
                posting(account.id, *side, *amount, 15)
            })
            .collect();

        let balance =
            BalanceEngine::accumulate(&account, &postings, DateRange::unbounded());

        prop_assert_eq!(position.version as usize, movements.len());
        prop_assert_eq!(position.debit_total, balance.debit_total);
        prop_assert_eq!(position.credit_total, balance.credit_total);
        prop_assert_eq!(position.balance(account.group), balance.balance);
    }

    /// A parent's roll-up over a two-level chart equals its own balance plus
    /// the sum of its children's, regardless of how balances are assigned.
    #[test]
    fn prop_rollup_is_subtree_sum(
        child_balances in proptest::collection::vec(
            (-10_000_000i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            1..8,
        ),
        parent_balance in (-10_000_000i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let mut tree = AccountTree::new();
        let parent = Account::new("Assets", LedgerGroup::Asset, Currency::Usd);
        let parent_id = parent.id;
        tree.insert(parent).unwrap();

        let mut own = HashMap::from([(parent_id, parent_balance)]);
        for (index, balance) in child_balances.iter().enumerate() {
            let child = Account::new(format!("Child {index}"), LedgerGroup::Asset, Currency::Usd)
                .with_parent(parent_id);
            own.insert(child.id, *balance);
            tree.insert(child).unwrap();
        }

        let expected: Decimal = parent_balance + child_balances.iter().copied().sum::<Decimal>();
        prop_assert_eq!(BalanceEngine::rolled_up(&tree, &own, parent_id), expected);
    }
}
