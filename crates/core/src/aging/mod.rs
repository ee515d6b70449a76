//! Receivable and payable aging.
//!
//! This module implements open-item tracking and the aging report:
//! - Open items with settlement history and derived status
//! - Time-since-due buckets relative to a report date
//! - Per-counterparty rows and the grand total

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::OpenItemError;
pub use service::AgingService;
pub use types::{
    AgingBucket, AgingReport, AgingRow, BucketTotals, OpenItem, OpenItemKind, Settlement,
    SettlementStatus,
};
