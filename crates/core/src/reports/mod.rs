//! Financial report generation.
//!
//! This module assembles the financial statements from balance engine
//! output:
//! - Trial Balance
//! - Balance Sheet
//! - Profit and Loss
//! - Cash Flow

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::{
    Activity, ActivitySection, BalanceSheet, CashFlow, CashFlowItem, CashMovement, ProfitAndLoss,
    ReportSection, SectionLine, TrialBalance, TrialBalanceGroup, TrialBalanceLine,
};
