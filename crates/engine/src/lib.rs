//! Concurrent ledger engine for Kontor.
//!
//! This crate wraps the pure logic from `kontor-core` in a thread-safe
//! in-memory store and exposes the [`Ledger`] facade:
//!
//! - `accounts` - chart of accounts maintenance
//! - `journal` - entry drafting, posting, reversal, and listing
//! - `vouchers` - the cash voucher workflow
//! - `receivables` - open items, settlements, and aging
//! - `reporting` - cached financial statements over posted snapshots
//!
//! The ledger is cheap to clone; clones share the same store.

use std::sync::Arc;

use kontor_shared::EngineConfig;

mod accounts;
pub mod error;
mod journal;
mod receivables;
mod reporting;
mod store;
mod vouchers;

pub use error::EngineError;
pub use journal::EntryPage;
pub use receivables::RegisterItemInput;
pub use vouchers::CreateVoucherInput;

use reporting::ReportCache;
use store::LedgerStore;

/// The posting and reporting engine.
///
/// All state lives in memory. Posted entries are append-only: the only
/// way to undo one is to post its reversal.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<LedgerStore>,
    reports: ReportCache,
    config: EngineConfig,
}

impl Ledger {
    /// Creates an empty ledger with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let reports = ReportCache::new(&config.reports);
        Self {
            store: Arc::new(LedgerStore::new()),
            reports,
            config,
        }
    }

    /// The configuration the ledger was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of entries in the posted log.
    #[must_use]
    pub fn posted_count(&self) -> u64 {
        self.store.watermark()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
