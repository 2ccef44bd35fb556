use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{Record, Scalar, Table};

/// Column added by [`cumulative_count`] and [`value_counts`].
pub const COUNT_COLUMN: &str = "count";

/// Assigns every row a zero-based running count of the earlier rows in the same `category`.
///
/// Rows are first sorted ascending on `timestamp`. The sort is stable, so rows with equal
/// timestamps keep the order in which they were fetched. Each category counts independently,
/// which gives one running-total series per category.
pub fn cumulative_count(table: &Table, category: &str, timestamp: &str) -> Table {
    let sorted = table.clone().sort_by_column(timestamp);
    let mut seen: HashMap<Scalar, u64> = HashMap::new();

    let counts = sorted
        .column(category)
        .map(|value| {
            let count = seen.entry(value.clone()).or_default();
            let current = *count;
            *count += 1;

            Scalar::from(current)
        })
        .collect::<Vec<_>>();

    sorted.with_column(COUNT_COLUMN, counts)
}

/// Counts the rows per distinct value of `column`, in first-seen order.
pub fn value_counts(table: &Table, column: &str) -> Table {
    let mut counts: IndexMap<&Scalar, u64> = IndexMap::new();

    for value in table.column(column) {
        *counts.entry(value).or_default() += 1;
    }

    let rows = counts.into_iter().map(|(value, count)| {
        Record::from([
            (column.to_owned(), value.clone()),
            (COUNT_COLUMN.to_owned(), Scalar::from(count)),
        ])
    });

    Table::new(vec![column.to_owned(), COUNT_COLUMN.to_owned()], rows)
}
