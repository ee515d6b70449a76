//! Property-based tests for journal entry resolution and reversal.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use kontor_shared::types::{AccountId, Currency};

use super::error::JournalError;
use super::service::{AccountMeta, JournalService};
use super::types::{CreateEntryInput, EntryKind, EntryLine, EntryState, Side};
use crate::accounts::AccountRef;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a small number of split lines.
fn split_count() -> impl Strategy<Value = usize> {
    1usize..5
}

fn make_input(lines: Vec<EntryLine>) -> CreateEntryInput {
    CreateEntryInput {
        kind: EntryKind::General,
        entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        description: "Property entry".to_string(),
        reference: None,
        currency: None,
        lines,
    }
}

/// Builds a resolver backed by a map that knows every account referenced
/// by the given lines.
fn resolver_for(
    lines: &[EntryLine],
) -> impl Fn(&AccountRef) -> Result<AccountMeta, JournalError> + use<> {
    let mut accounts = HashMap::new();
    for line in lines {
        if let AccountRef::ById(id) = &line.account {
            accounts.insert(
                *id,
                AccountMeta {
                    id: *id,
                    currency: Currency::Usd,
                    archived: false,
                },
            );
        }
    }
    move |account_ref| match account_ref {
        AccountRef::ById(id) => accounts
            .get(id)
            .cloned()
            .ok_or_else(|| JournalError::AccountNotFound(account_ref.to_string())),
        AccountRef::ByCode(_) => Err(JournalError::AccountNotFound(account_ref.to_string())),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any balanced split of an amount across debit lines, resolution
    /// succeeds and the totals equal the split total.
    #[test]
    fn prop_balanced_split_resolves(
        amounts in proptest::collection::vec(positive_amount(), 1..5),
    ) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<EntryLine> = amounts
            .iter()
            .map(|amount| EntryLine::debit(AccountId::new(), *amount))
            .collect();
        lines.push(EntryLine::credit(AccountId::new(), total));

        let input = make_input(lines);
        let resolve = resolver_for(&input.lines);
        let validated =
            JournalService::validate_and_resolve(&input, Currency::Usd, resolve).unwrap();

        prop_assert!(validated.totals.is_balanced);
        prop_assert_eq!(validated.totals.total_debit, total);
        prop_assert_eq!(validated.totals.total_credit, total);
        prop_assert_eq!(validated.lines.len(), amounts.len() + 1);
    }

    /// For any drafted entry, the signed posting amounts sum to zero.
    #[test]
    fn prop_drafted_entry_signed_sum_is_zero(
        amount in positive_amount(),
        splits in split_count(),
    ) {
        let per_line = amount;
        let mut lines: Vec<EntryLine> = (0..splits)
            .map(|_| EntryLine::debit(AccountId::new(), per_line))
            .collect();
        let total: Decimal = per_line * Decimal::from(splits as u64);
        lines.push(EntryLine::credit(AccountId::new(), total));

        let input = make_input(lines);
        let resolve = resolver_for(&input.lines);
        let validated =
            JournalService::validate_and_resolve(&input, Currency::Usd, resolve).unwrap();
        let entry = JournalService::draft_entry(&input, &validated);

        let signed_sum: Decimal = entry.postings.iter().map(|p| p.signed_amount()).sum();
        prop_assert_eq!(signed_sum, Decimal::ZERO);
    }

    /// For any posted entry, its reversal flips every posting while keeping
    /// amounts and accounts, so original plus mirror cancel per account.
    #[test]
    fn prop_reversal_cancels_original(
        amount in positive_amount(),
        splits in split_count(),
    ) {
        let mut lines: Vec<EntryLine> = (0..splits)
            .map(|_| EntryLine::debit(AccountId::new(), amount))
            .collect();
        let total: Decimal = amount * Decimal::from(splits as u64);
        lines.push(EntryLine::credit(AccountId::new(), total));

        let input = make_input(lines);
        let resolve = resolver_for(&input.lines);
        let validated =
            JournalService::validate_and_resolve(&input, Currency::Usd, resolve).unwrap();
        let mut entry = JournalService::draft_entry(&input, &validated);
        entry.state = EntryState::Posted;
        entry.seq = Some(1);

        let mirror = JournalService::build_reversal(
            &entry,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            "test",
        )
        .unwrap();

        prop_assert!(JournalService::validate_reversal(&entry, &mirror).is_ok());
        prop_assert_eq!(mirror.total_debit(), entry.total_credit());
        prop_assert_eq!(mirror.total_credit(), entry.total_debit());

        // Net movement per account across both entries is zero.
        let mut per_account: HashMap<AccountId, Decimal> = HashMap::new();
        for posting in entry.postings.iter().chain(&mirror.postings) {
            *per_account.entry(posting.account_id).or_default() += posting.signed_amount();
        }
        for (account_id, net) in per_account {
            prop_assert_eq!(net, Decimal::ZERO, "account {} did not cancel", account_id);
        }
    }

    /// For any entry, reversing the mirror of a reversal still flips sides
    /// relative to the mirror (flip is an involution).
    #[test]
    fn prop_side_flip_involution(side in prop_oneof![Just(Side::Debit), Just(Side::Credit)]) {
        prop_assert_eq!(side.flip().flip(), side);
        prop_assert_ne!(side.flip(), side);
    }
}
