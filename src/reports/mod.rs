//! Reports module for fintrack
//!
//! `totals` holds the pure aggregations; the report types turn them into
//! terminal output and CSV.

pub mod category;
pub mod monthly;
pub mod totals;

pub use category::{CategoryReport, CategoryRow};
pub use monthly::MonthlyReport;
