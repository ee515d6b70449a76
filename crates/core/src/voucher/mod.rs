//! Voucher workflow.
//!
//! This module implements the cash voucher lifecycle:
//! - Voucher kinds, states, and the voucher aggregate
//! - The workflow service enforcing draft → approved → posted
//! - Journal line construction for each voucher kind

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::VoucherError;
pub use service::VoucherService;
pub use types::{Counterparty, PartyKind, Voucher, VoucherAction, VoucherKind, VoucherState};
