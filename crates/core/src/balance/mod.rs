//! Balance computation.
//!
//! This module turns the posted log into account balances:
//! - Normal-side rules deciding which side grows an account
//! - Per-account accumulation over a date range
//! - Running positions maintained inside the posting commit
//! - Hierarchy roll-ups over the chart of accounts

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::BalanceEngine;
pub use types::{AccountBalance, BalanceLine, DateRange, NormalSide, RunningPosition};
