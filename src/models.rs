//! Data models for the statistics pipeline.
//!
//! This module contains the columnar [`Table`] produced by the loader,
//! the typed grouping [`KeyValue`], and the [`AggregatedTable`] handed to
//! the report generator.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Values held by one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Raw cells as read from the file.
    Text(Vec<String>),
    /// Cells after float coercion; missing values are `NaN`.
    Float(Vec<f64>),
}

impl ColumnData {
    /// Float view of the column, if it has been coerced.
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }
}

/// A named column of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// An in-memory table whose columns follow the file's header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Table {
    /// Build an all-text table from a header and its rows.
    pub fn from_text_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        let mut cells: Vec<Vec<String>> = headers
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for row in rows {
            for (idx, value) in row.into_iter().enumerate() {
                if let Some(column) = cells.get_mut(idx) {
                    column.push(value);
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column {
                name,
                data: ColumnData::Text(values),
            })
            .collect();

        Self { columns, row_count }
    }

    /// Column names in header order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column by name for in-place modification.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// A typed grouping-key cell.
///
/// Ordered `Null < Integer < Float < Text` so it can key a `BTreeMap`;
/// floats compare with `total_cmp`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl KeyValue {
    /// Type a whole text column the way a dataframe reader would: integers
    /// if every non-empty cell is an integer, floats if every non-empty
    /// cell is a number, text otherwise. Empty cells become `Null`.
    pub fn infer_column(cells: &[String]) -> Vec<KeyValue> {
        let non_empty = || cells.iter().map(|c| c.trim()).filter(|c| !c.is_empty());

        if non_empty().all(|c| c.parse::<i64>().is_ok()) {
            return cells
                .iter()
                .map(|c| match c.trim().parse::<i64>() {
                    Ok(i) => KeyValue::Integer(i),
                    Err(_) => KeyValue::Null,
                })
                .collect();
        }

        if non_empty().all(|c| c.parse::<f64>().is_ok()) {
            return cells
                .iter()
                .map(|c| match c.trim().parse::<f64>() {
                    Ok(f) if !f.is_nan() => KeyValue::Float(f),
                    _ => KeyValue::Null,
                })
                .collect();
        }

        cells
            .iter()
            .map(|c| {
                if is_missing_text(c) {
                    KeyValue::Null
                } else {
                    KeyValue::Text(c.clone())
                }
            })
            .collect()
    }

    /// Key values for an already-coerced column.
    pub fn from_floats(values: &[f64]) -> Vec<KeyValue> {
        values
            .iter()
            .map(|&f| {
                if f.is_nan() {
                    KeyValue::Null
                } else {
                    KeyValue::Float(f)
                }
            })
            .collect()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, KeyValue::Null)
    }
}

/// Empty or literal `NaN`/`nan` cells are missing keys.
fn is_missing_text(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().map_or(false, |f| f.is_nan())
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(v: &KeyValue) -> u8 {
            match v {
                KeyValue::Null => 0,
                KeyValue::Integer(_) => 1,
                KeyValue::Float(_) => 2,
                KeyValue::Text(_) => 3,
            }
        }

        match (self, other) {
            (KeyValue::Null, KeyValue::Null) => Ordering::Equal,
            (KeyValue::Integer(a), KeyValue::Integer(b)) => a.cmp(b),
            (KeyValue::Float(a), KeyValue::Float(b)) => a.total_cmp(b),
            (KeyValue::Text(a), KeyValue::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => Ok(()),
            KeyValue::Integer(i) => write!(f, "{}", i),
            KeyValue::Float(v) => write!(f, "{:?}", v),
            KeyValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A statistic computed per group and measured column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Arithmetic mean
    Mean,
    /// Sample standard deviation (divisor N-1)
    Std,
    /// Number of non-missing values
    Count,
    Min,
    Max,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Mean => write!(f, "mean"),
            Statistic::Std => write!(f, "std"),
            Statistic::Count => write!(f, "count"),
            Statistic::Min => write!(f, "min"),
            Statistic::Max => write!(f, "max"),
        }
    }
}

impl Statistic {
    /// Pick this statistic out of a summary.
    pub fn value(&self, stats: &SummaryStats) -> f64 {
        match self {
            Statistic::Mean => stats.mean,
            Statistic::Std => stats.std,
            Statistic::Count => stats.count as f64,
            Statistic::Min => stats.min,
            Statistic::Max => stats.max,
        }
    }

    /// Whether the statistic is a whole number.
    pub fn is_integral(&self) -> bool {
        matches!(self, Statistic::Count)
    }
}

/// Descriptive statistics of one group's values for one measured column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// One output row: a group key and its statistics per measured column.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    /// Key values, one per index column.
    pub key: Vec<KeyValue>,
    /// Number of input rows in the group.
    pub rows: usize,
    /// Statistics, one entry per measured column.
    pub stats: Vec<SummaryStats>,
}

/// A grouped-aggregate table indexed by the grouping keys, with a
/// two-level (measured column × statistic) column structure.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedTable {
    pub index_names: Vec<String>,
    pub measures: Vec<String>,
    pub statistics: Vec<Statistic>,
    pub groups: Vec<GroupRow>,
}

impl AggregatedTable {
    /// Flattened (measure, statistic) column pairs in output order.
    pub fn column_pairs(&self) -> Vec<(&str, Statistic)> {
        self.measures
            .iter()
            .flat_map(|m| self.statistics.iter().map(move |s| (m.as_str(), *s)))
            .collect()
    }

    /// Values of one group row in [`column_pairs`](Self::column_pairs) order.
    pub fn row_values(&self, group: &GroupRow) -> Vec<(Statistic, f64)> {
        group
            .stats
            .iter()
            .flat_map(|s| self.statistics.iter().map(move |stat| (*stat, stat.value(s))))
            .collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
