//! fintrack - personal finance tracker backed by a single CSV file
//!
//! Records spending transactions, validates user input, and aggregates
//! totals by category and by month for reports and charts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, categories, months and transactions
//! - `storage`: CSV file storage with atomic rewrites
//! - `reports`: Aggregation and report generation
//! - `display`: Tables and bar charts for the terminal
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::models::EntryInput;
//! use fintrack::storage::TransactionStore;
//!
//! let mut store = TransactionStore::open("transactions.csv")?;
//! store.add(&EntryInput::new("12.50", "Food", "2024-05-01"))?;
//! let by_category = store.aggregate_by_category();
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{TrackerError, TrackerResult, ValidationError};
