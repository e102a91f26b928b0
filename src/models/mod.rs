//! Core data models for fintrack
//!
//! Transactions, their categories, money amounts and calendar months.

pub mod category;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{Category, UnknownCategory};
pub use money::{Money, MoneyParseError};
pub use period::MonthKey;
pub use transaction::{validate_entry, EntryInput, TransactionEntry, DATE_FORMAT};
