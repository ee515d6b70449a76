//! Core posting and reporting logic for Kontor.
//!
//! This crate contains pure business logic with ZERO storage or web dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts and the account tree
//! - `journal` - Double-entry journal entries and posting rules
//! - `voucher` - Cash voucher lifecycle and workflow
//! - `balance` - Balance calculation and hierarchy roll-ups
//! - `reports` - Financial statement assembly
//! - `aging` - Receivable and payable aging buckets

pub mod accounts;
pub mod aging;
pub mod balance;
pub mod journal;
pub mod reports;
pub mod voucher;
