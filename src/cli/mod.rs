//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the transaction store.

pub mod category;
pub mod export;
pub mod report;
pub mod transaction;

pub use category::handle_categories;
pub use export::{handle_export, ExportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_add, handle_list, AddArgs, ListArgs};
