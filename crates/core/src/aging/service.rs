//! Aging report assembly.

use chrono::NaiveDate;

use super::types::{AgingBucket, AgingReport, AgingRow, BucketTotals, OpenItem, OpenItemKind};

/// Stateless aging calculator over open items.
pub struct AgingService;

impl AgingService {
    /// The bucket an item due on `due_date` falls into as of `as_of`.
    ///
    /// Measured in whole days past due. An item due on or after the
    /// report date is current.
    #[must_use]
    pub fn bucket_for(due_date: NaiveDate, as_of: NaiveDate) -> AgingBucket {
        let days_past_due = (as_of - due_date).num_days();
        match days_past_due {
            ..=0 => AgingBucket::Current,
            1..=30 => AgingBucket::Days0To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    /// Buckets open items of one kind by time past due.
    ///
    /// Items of the other kind and items with nothing outstanding are
    /// skipped. Rows are summed per counterparty and sorted by party id;
    /// the grand total aggregates every row, so bucket totals always sum
    /// back to the outstanding input total.
    #[must_use]
    pub fn age(kind: OpenItemKind, items: &[OpenItem], as_of: NaiveDate) -> AgingReport {
        let mut rows: Vec<AgingRow> = Vec::new();

        for item in items {
            if item.kind != kind || item.outstanding.is_zero() {
                continue;
            }
            let bucket = Self::bucket_for(item.due_date, as_of);
            let row = match rows
                .iter_mut()
                .find(|row| row.counterparty == item.counterparty)
            {
                Some(row) => row,
                None => {
                    rows.push(AgingRow {
                        counterparty: item.counterparty,
                        buckets: BucketTotals::default(),
                        item_count: 0,
                    });
                    rows.last_mut().expect("row just pushed")
                }
            };
            row.buckets.add(bucket, item.outstanding);
            row.item_count += 1;
        }

        rows.sort_by_key(|row| row.counterparty.id);

        let mut grand_total = BucketTotals::default();
        for row in &rows {
            grand_total.merge(&row.buckets);
        }

        AgingReport {
            kind,
            as_of,
            rows,
            grand_total,
        }
    }
}
