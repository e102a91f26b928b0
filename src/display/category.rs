//! Category display formatting

use std::collections::BTreeMap;

use crate::models::{Category, Money};

/// Format the fixed category set as a tree, with totals where known
///
/// Labels from the file outside the fixed set are listed after it.
pub fn format_category_tree(totals: &BTreeMap<Category, Money>, currency_label: &str) -> String {
    let mut output = String::from("Categories\n");

    let fixed = Category::ALL;
    let listed: Vec<&Category> = fixed
        .iter()
        .chain(totals.keys().filter(|c| c.is_custom()))
        .collect();

    for (i, category) in listed.iter().enumerate() {
        let prefix = if i == listed.len() - 1 {
            "└── "
        } else {
            "├── "
        };

        let total = match totals.get(*category) {
            Some(total) => format!(" ({})", total.format_with_label(currency_label)),
            None => String::new(),
        };

        output.push_str(&format!("  {}{}{}\n", prefix, category, total));
    }

    output
}
