//! Shared fixtures for engine integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use kontor_core::accounts::{Account, LedgerGroup};
use kontor_core::journal::{CreateEntryInput, EntryLine};
use kontor_engine::Ledger;
use kontor_shared::types::{AccountId, Currency};

/// A ledger seeded with a small chart of accounts.
pub struct Fixture {
    pub ledger: Ledger,
    pub cash: AccountId,
    pub bank: AccountId,
    pub receivables: AccountId,
    pub payables: AccountId,
    pub loan: AccountId,
    pub capital: AccountId,
    pub sales: AccountId,
    pub rent: AccountId,
    pub equipment: AccountId,
}

pub fn ledger_with_chart() -> Fixture {
    let ledger = Ledger::default();
    let add = |name: &str, code: &str, group: LedgerGroup| {
        ledger
            .add_account(Account::new(name, group, Currency::Usd).with_code(code))
            .expect("seed account")
    };

    Fixture {
        cash: add("Cash", "1010", LedgerGroup::Asset),
        bank: add("Bank", "1020", LedgerGroup::Asset),
        receivables: add("Accounts Receivable", "1200", LedgerGroup::Asset),
        equipment: add("Equipment", "1500", LedgerGroup::Asset),
        payables: add("Accounts Payable", "2000", LedgerGroup::Liability),
        loan: add("Bank Loan", "2100", LedgerGroup::Liability),
        capital: add("Owner Capital", "3000", LedgerGroup::Equity),
        sales: add("Sales Revenue", "4000", LedgerGroup::Revenue),
        rent: add("Rent Expense", "5000", LedgerGroup::Expense),
        ledger,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A balanced two-line entry input: debit one account, credit another.
pub fn simple_entry(
    debit: AccountId,
    credit: AccountId,
    amount: Decimal,
    entry_date: NaiveDate,
    description: &str,
) -> CreateEntryInput {
    CreateEntryInput::general(
        entry_date,
        description,
        vec![
            EntryLine::debit(debit, amount),
            EntryLine::credit(credit, amount),
        ],
    )
}
