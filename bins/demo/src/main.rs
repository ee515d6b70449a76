//! Kontor demo walkthrough.
//!
//! Seeds a small chart of accounts, runs entries, vouchers, and
//! settlements through the engine, and prints every report as JSON.

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kontor_core::accounts::{Account, LedgerGroup};
use kontor_core::aging::OpenItemKind;
use kontor_core::journal::{CreateEntryInput, EntryLine};
use kontor_core::voucher::{Counterparty, PartyKind, VoucherKind};
use kontor_engine::{CreateVoucherInput, Ledger, RegisterItemInput};
use kontor_shared::types::{AccountId, Currency, Money, PartyId};
use kontor_shared::EngineConfig;

struct Chart {
    cash: AccountId,
    bank: AccountId,
    receivables: AccountId,
    equipment: AccountId,
    loan: AccountId,
    capital: AccountId,
    sales: AccountId,
    rent: AccountId,
}

fn seed_chart(ledger: &Ledger) -> anyhow::Result<Chart> {
    let add = |name: &str, code: &str, group: LedgerGroup| {
        ledger
            .add_account(Account::new(name, group, Currency::Usd).with_code(code))
            .with_context(|| format!("seeding account {name}"))
    };

    Ok(Chart {
        cash: add("Cash", "1010", LedgerGroup::Asset)?,
        bank: add("Bank", "1020", LedgerGroup::Asset)?,
        receivables: add("Accounts Receivable", "1200", LedgerGroup::Asset)?,
        equipment: add("Equipment", "1500", LedgerGroup::Asset)?,
        loan: add("Bank Loan", "2100", LedgerGroup::Liability)?,
        capital: add("Owner Capital", "3000", LedgerGroup::Equity)?,
        sales: add("Sales Revenue", "4000", LedgerGroup::Revenue)?,
        rent: add("Rent Expense", "5000", LedgerGroup::Expense)?,
    })
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid demo date")
}

fn post(
    ledger: &Ledger,
    entry_date: NaiveDate,
    description: &str,
    lines: Vec<EntryLine>,
) -> anyhow::Result<()> {
    let draft = ledger.create_entry(CreateEntryInput::general(entry_date, description, lines))?;
    ledger.post_entry(draft.id)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kontor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::load().context("loading configuration")?;
    let ledger = Ledger::new(config);
    let chart = seed_chart(&ledger)?;
    info!(accounts = ledger.accounts().len(), "chart seeded");

    // Opening capital lands in the bank through a deposit voucher.
    let deposit = ledger.create_voucher(CreateVoucherInput {
        kind: VoucherKind::Deposit,
        number: Some("DV-0001".to_string()),
        date: date(2026, 3, 1),
        counterparty: None,
        cash_account: chart.bank,
        offset_account: chart.capital,
        amount: dec!(5000.00),
        currency: None,
        memo: Some("opening capital".to_string()),
    })?;
    ledger.approve_voucher(deposit.id, None)?;
    ledger.post_voucher(deposit.id)?;

    // General journal activity for March.
    post(
        &ledger,
        date(2026, 3, 2),
        "bank loan drawdown",
        vec![
            EntryLine::debit(chart.bank, dec!(2000.00)),
            EntryLine::credit(chart.loan, dec!(2000.00)),
        ],
    )?;
    post(
        &ledger,
        date(2026, 3, 4),
        "espresso machine",
        vec![
            EntryLine::debit(chart.equipment, dec!(1500.00)),
            EntryLine::credit(chart.bank, dec!(1500.00)),
        ],
    )?;
    post(
        &ledger,
        date(2026, 3, 5),
        "cash sales, opening week",
        vec![
            EntryLine::debit(chart.cash, dec!(1200.00)),
            EntryLine::credit(chart.sales, dec!(1200.00)),
        ],
    )?;
    post(
        &ledger,
        date(2026, 3, 8),
        "march rent",
        vec![
            EntryLine::debit(chart.rent, dec!(800.00)),
            EntryLine::credit(chart.bank, dec!(800.00)),
        ],
    )?;

    // A duplicate receipt slips in and gets reversed, never deleted.
    let duplicate = ledger.create_entry(CreateEntryInput::general(
        date(2026, 3, 9),
        "cash sale, entered twice",
        vec![
            EntryLine::debit(chart.cash, dec!(200.00)),
            EntryLine::credit(chart.sales, dec!(200.00)),
        ],
    ))?;
    let duplicate = ledger.post_entry(duplicate.id)?;
    ledger.reverse_entry(duplicate.id, date(2026, 3, 9), "duplicate receipt")?;

    // An invoice on credit, partially settled through a receipt voucher.
    let client = Counterparty {
        kind: PartyKind::Client,
        id: PartyId::new(),
    };
    post(
        &ledger,
        date(2026, 1, 15),
        "catering invoice INV-1001",
        vec![
            EntryLine::debit(chart.receivables, dec!(900.00)),
            EntryLine::credit(chart.sales, dec!(900.00)),
        ],
    )?;
    let invoice = ledger.register_open_item(RegisterItemInput {
        kind: OpenItemKind::Receivable,
        counterparty: client,
        issue_date: date(2026, 1, 15),
        due_date: date(2026, 2, 14),
        total: dec!(900.00),
        reference: Some("INV-1001".to_string()),
    })?;
    let base = ledger.config().ledger.base_currency;
    let (invoice, _) = ledger.settle_with_voucher(
        invoice.id,
        chart.cash,
        chart.receivables,
        Money::new(dec!(400.00), base),
        date(2026, 3, 20),
    )?;
    info!(outstanding = %invoice.outstanding, "invoice partially settled");

    // Every statement over the same posted snapshot.
    let as_of = date(2026, 3, 31);
    let trial_balance = ledger.trial_balance(as_of);
    let balance_sheet = ledger.balance_sheet(as_of);
    let profit_and_loss = ledger.profit_and_loss(date(2026, 3, 1), as_of);
    let cash_flow = ledger.cash_flow(date(2026, 3, 1), as_of);
    let aging = ledger.aging(OpenItemKind::Receivable, as_of);

    println!("== Trial Balance ==");
    println!("{}", serde_json::to_string_pretty(&*trial_balance)?);
    println!("== Balance Sheet ==");
    println!("{}", serde_json::to_string_pretty(&*balance_sheet)?);
    println!("== Profit and Loss ==");
    println!("{}", serde_json::to_string_pretty(&*profit_and_loss)?);
    println!("== Cash Flow ==");
    println!("{}", serde_json::to_string_pretty(&*cash_flow)?);
    println!("== Receivables Aging ==");
    println!("{}", serde_json::to_string_pretty(&aging)?);

    info!(
        posted = ledger.posted_count(),
        balanced = trial_balance.is_balanced,
        "demo complete"
    );
    Ok(())
}
