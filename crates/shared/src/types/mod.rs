//! Common types used across the engine.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{Currency, Money, MoneyError};
pub use pagination::{PageRequest, PageResponse};
