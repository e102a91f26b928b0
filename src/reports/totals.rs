//! Pure aggregation over transaction entries
//!
//! No I/O here; report rendering consumes these maps.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Category, Money, MonthKey, TransactionEntry};

/// Sum of amounts per category; categories without entries are absent
pub fn by_category(entries: &[TransactionEntry]) -> BTreeMap<Category, Money> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals
            .entry(entry.category().clone())
            .or_insert_with(Money::zero) += entry.amount();
    }
    totals
}

/// Sum of amounts per calendar month, iterated oldest first
pub fn by_month(entries: &[TransactionEntry]) -> BTreeMap<MonthKey, Money> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals
            .entry(MonthKey::of(entry.date()))
            .or_insert_with(Money::zero) += entry.amount();
    }
    totals
}

/// Month x category table
///
/// Every category that occurs anywhere in `entries` has a value in every
/// month row, zero where that month had no spending in it.
pub fn by_month_and_category(
    entries: &[TransactionEntry],
) -> BTreeMap<MonthKey, BTreeMap<Category, Money>> {
    let columns: BTreeSet<Category> = entries.iter().map(|e| e.category().clone()).collect();

    let mut table: BTreeMap<MonthKey, BTreeMap<Category, Money>> = BTreeMap::new();
    for entry in entries {
        let row = table.entry(MonthKey::of(entry.date())).or_insert_with(|| {
            columns.iter().map(|c| (c.clone(), Money::zero())).collect()
        });
        *row
            .entry(entry.category().clone())
            .or_insert_with(Money::zero) += entry.amount();
    }
    table
}

/// Sum of all amounts
pub fn grand_total(entries: &[TransactionEntry]) -> Money {
    entries.iter().map(|e| e.amount()).sum()
}
