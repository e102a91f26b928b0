//! CLI command listing the category set

use crate::config::Settings;
use crate::display::format_category_tree;
use crate::error::TrackerResult;
use crate::storage::TransactionStore;

/// Print every category with its running total
pub fn handle_categories(store: &TransactionStore, settings: &Settings) -> TrackerResult<()> {
    let totals = store.aggregate_by_category();
    print!("{}", format_category_tree(&totals, &settings.currency_label));
    Ok(())
}
