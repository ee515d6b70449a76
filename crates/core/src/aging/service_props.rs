//! Property-based tests for aging bucket classification.

use chrono::{Days, NaiveDate};
use kontor_shared::types::{Currency, PartyId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AgingService;
use super::types::{OpenItem, OpenItemKind};
use crate::voucher::{Counterparty, PartyKind};

/// Strategy for a positive outstanding amount in cents.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a due-date offset: negative is overdue, positive not yet due.
fn due_offset() -> impl Strategy<Value = i64> {
    -400i64..120
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

fn item(party: Counterparty, offset: i64, total: Decimal) -> OpenItem {
    let due = if offset >= 0 {
        as_of() + Days::new(offset.unsigned_abs())
    } else {
        as_of() - Days::new(offset.unsigned_abs())
    };
    OpenItem::new(
        OpenItemKind::Receivable,
        party,
        due - Days::new(14),
        due,
        total,
        Currency::Usd,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Bucket totals always sum back to the outstanding input total, for
    /// every row and overall.
    #[test]
    fn prop_buckets_conserve_outstanding(
        raw in proptest::collection::vec((due_offset(), amount(), 0usize..4), 0..30),
    ) {
        let parties: Vec<Counterparty> = (0..4)
            .map(|_| Counterparty {
                kind: PartyKind::Client,
                id: PartyId::new(),
            })
            .collect();
        let items: Vec<OpenItem> = raw
            .iter()
            .map(|(offset, total, party)| item(parties[*party], *offset, *total))
            .collect();

        let report = AgingService::age(OpenItemKind::Receivable, &items, as_of());

        let input_total: Decimal = items.iter().map(|i| i.outstanding).sum();
        prop_assert_eq!(report.grand_total.total(), input_total);

        for row in &report.rows {
            let row_input: Decimal = items
                .iter()
                .filter(|i| i.counterparty == row.counterparty)
                .map(|i| i.outstanding)
                .sum();
            prop_assert_eq!(row.buckets.total(), row_input);
        }

        let row_sum: Decimal = report.rows.iter().map(|row| row.buckets.total()).sum();
        prop_assert_eq!(row_sum, input_total);
    }

    /// Every item lands in exactly one bucket, and the bucket matches the
    /// whole-day distance between due date and report date.
    #[test]
    fn prop_single_bucket_per_item(offset in due_offset(), total in amount()) {
        let party = Counterparty {
            kind: PartyKind::Client,
            id: PartyId::new(),
        };
        let single = item(party, offset, total);
        let days_past_due = (as_of() - single.due_date).num_days();

        let report = AgingService::age(OpenItemKind::Receivable, &[single], as_of());
        prop_assert_eq!(report.rows.len(), 1);

        let buckets = report.rows[0].buckets;
        let populated = [
            (buckets.current, days_past_due <= 0),
            (buckets.days_0_30, (1..=30).contains(&days_past_due)),
            (buckets.days_31_60, (31..=60).contains(&days_past_due)),
            (buckets.days_61_90, (61..=90).contains(&days_past_due)),
            (buckets.over_90, days_past_due > 90),
        ];
        for (value, expected) in populated {
            if expected {
                prop_assert_eq!(value, total);
            } else {
                prop_assert_eq!(value, Decimal::ZERO);
            }
        }
    }
}
