//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and bar charts.

pub mod category;
pub mod chart;
pub mod report;
pub mod transaction;

pub use category::format_category_tree;
pub use chart::{BarChart, ChartSpec, ChartStyle};
pub use report::{format_breakdown_table, format_percentage};
pub use transaction::format_transaction_table;
