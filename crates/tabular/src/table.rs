use indexmap::{IndexMap, IndexSet};
use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::Scalar;

/// One flattened row, keyed by column path.
pub type Record = IndexMap<String, Scalar>;

/// An ordered sequence of records sharing one column universe.
///
/// Every row holds every column, in column order. A value the source did not have is stored as
/// [`Scalar::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table with an explicit column universe. Row keys outside of it are discarded.
    pub fn new(columns: Vec<String>, rows: impl IntoIterator<Item = Record>) -> Self {
        let rows = rows.into_iter().map(|row| conform(&columns, row)).collect();

        Self { columns, rows }
    }

    /// Builds a table whose columns are the union of the record keys, in first-seen order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = records
            .iter()
            .flat_map(|record| record.keys())
            .cloned()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        Self::new(columns, records)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// The values of one column, top to bottom. Unknown columns read as all nulls.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Scalar> + 'a {
        const NULL: &Scalar = &Scalar::Null;

        self.rows.iter().map(move |row| row.get(name).unwrap_or(NULL))
    }

    /// Removes every column whose value is null in all rows.
    pub fn drop_empty_columns(self) -> Self {
        let columns = self
            .columns
            .iter()
            .filter(|column| self.column(column).any(|value| !value.is_null()))
            .cloned()
            .collect();

        Self::new(columns, self.rows)
    }

    pub fn filter(self, mut predicate: impl FnMut(&Record) -> bool) -> Self {
        let rows = self.rows.into_iter().filter(|row| predicate(row)).collect();

        Self {
            columns: self.columns,
            rows,
        }
    }

    /// Projects the table onto `columns`. Columns the table does not have are filled with nulls.
    pub fn select(self, columns: &[&str]) -> Self {
        let columns = columns.iter().map(|column| (*column).to_owned()).collect();

        Self::new(columns, self.rows)
    }

    /// Parses the RFC 3339 strings of `column` into timestamps.
    pub fn parse_timestamps(mut self, column: &str) -> Self {
        for row in &mut self.rows {
            if let Some(value) = row.get_mut(column) {
                *value = std::mem::take(value).into_timestamp();
            }
        }

        self
    }

    /// Sorts the rows ascending on `column`. The sort is stable, so equal values keep their order.
    pub fn sort_by_column(mut self, column: &str) -> Self {
        self.rows.sort_by(|a, b| {
            let a = a.get(column).unwrap_or(&Scalar::Null);
            let b = b.get(column).unwrap_or(&Scalar::Null);
            a.compare(b)
        });

        self
    }

    /// Appends a column, or replaces one with the same name. Missing values become nulls.
    pub fn with_column(mut self, name: &str, values: impl IntoIterator<Item = Scalar>) -> Self {
        if !self.has_column(name) {
            self.columns.push(name.to_owned());
        }

        let mut values = values.into_iter();

        for row in &mut self.rows {
            row.insert(name.to_owned(), values.next().unwrap_or_default());
        }

        self
    }
}

fn conform(columns: &[String], mut row: Record) -> Record {
    columns
        .iter()
        .map(|column| (column.clone(), row.swap_remove(column).unwrap_or_default()))
        .collect()
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;

        for row in &self.rows {
            seq.serialize_element(row)?;
        }

        seq.end()
    }
}
