//! Dataset representation for validation.
//!
//! Rows arrive as flat maps from column name to an untyped scalar. The
//! coercion phase rewrites those scalars into the typed variants
//! ([`DataValue::Int`], [`DataValue::Float`], [`DataValue::Timestamp`], ...)
//! in the engine's private copy of the dataset.

use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Timestamp value, normalized to UTC without offset
    Timestamp(NaiveDateTime),
}

static NULL: DataValue = DataValue::Null;

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns true for null and for strings that are empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<NaiveDateTime> for DataValue {
    fn from(ts: NaiveDateTime) -> Self {
        DataValue::Timestamp(ts)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// A single row of data.
pub type DataRow = HashMap<String, DataValue>;

/// A dataset containing multiple rows.
///
/// Rows need not share the same keys; a key missing from a row reads as
/// [`DataValue::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    rows: Vec<DataRow>,
}

impl DataSet {
    /// Creates a new empty dataset.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a new dataset from rows.
    pub fn from_rows(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    /// Adds a row to the dataset.
    pub fn add_row(&mut self, row: DataRow) {
        self.rows.push(row);
    }

    /// Returns true if at least one row carries `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(column))
    }

    /// Returns the column universe: every key seen in any row, in order of
    /// first appearance.
    pub fn columns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &self.rows {
            let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
            keys.sort_unstable();
            for key in keys {
                if seen.insert(key) {
                    columns.push(key);
                }
            }
        }
        columns
    }

    /// Iterates over the values of `column`, one per row, with missing keys
    /// reading as null.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a DataValue> {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&NULL))
    }

    /// Replaces the values of `column` row by row.
    ///
    /// `values` must yield one value per row; surplus values are ignored.
    pub fn set_column(&mut self, column: &str, values: impl IntoIterator<Item = DataValue>) {
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(column.to_string(), value);
        }
    }
}

impl FromIterator<DataRow> for DataSet {
    fn from_iter<T: IntoIterator<Item = DataRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
