//! Group-by aggregation of measured columns.
//!
//! This module partitions a [`Table`] by its key columns and computes
//! per-group summary statistics for every measured column.

use crate::error::StatsError;
use crate::models::{
    AggregatedTable, ColumnData, GroupRow, KeyValue, Statistic, SummaryStats, Table,
};
use std::collections::BTreeMap;
use tracing::debug;

/// What to aggregate: key columns, measured columns and statistics.
#[derive(Debug, Clone)]
pub struct AggregateSpec {
    /// Grouping-key columns, outermost first.
    pub group_by: Vec<String>,
    /// Measured (numeric) columns.
    pub measures: Vec<String>,
    /// Statistics to report per measured column.
    pub statistics: Vec<Statistic>,
}

impl From<&crate::config::DatasetConfig> for AggregateSpec {
    fn from(config: &crate::config::DatasetConfig) -> Self {
        Self {
            group_by: config.group_by.clone(),
            measures: config.measures.clone(),
            statistics: config.statistics.clone(),
        }
    }
}

/// Rows sharing one key tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: Vec<KeyValue>,
    /// Row indices into the source table, in input order.
    pub rows: Vec<usize>,
}

/// Partition rows by the key columns.
///
/// Groups come back sorted by key tuple. Rows with an empty key cell are
/// dropped.
pub fn group_rows(table: &Table, keys: &[String]) -> Result<Vec<Group>, StatsError> {
    let key_columns: Vec<Vec<KeyValue>> = keys
        .iter()
        .map(|name| -> Result<Vec<KeyValue>, StatsError> {
            let column = table.column(name).ok_or_else(|| StatsError::MissingColumn {
                column: name.clone(),
            })?;
            Ok(match &column.data {
                ColumnData::Text(cells) => KeyValue::infer_column(cells),
                ColumnData::Float(values) => KeyValue::from_floats(values),
            })
        })
        .collect::<Result<_, _>>()?;

    let mut grouped: BTreeMap<Vec<KeyValue>, Vec<usize>> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in 0..table.len() {
        let key: Vec<KeyValue> = key_columns.iter().map(|col| col[row].clone()).collect();

        if key.iter().any(KeyValue::is_null) {
            dropped += 1;
            continue;
        }

        grouped.entry(key).or_default().push(row);
    }

    if dropped > 0 {
        debug!("Dropped {} rows with an empty grouping key", dropped);
    }

    Ok(grouped
        .into_iter()
        .map(|(key, rows)| Group { key, rows })
        .collect())
}

/// Group `table` and summarize every measured column within each group.
pub fn aggregate(table: &Table, spec: &AggregateSpec) -> Result<AggregatedTable, StatsError> {
    let measure_values: Vec<&[f64]> = spec
        .measures
        .iter()
        .map(|name| {
            let column = table.column(name).ok_or_else(|| StatsError::MissingColumn {
                column: name.clone(),
            })?;
            column.data.as_floats().ok_or_else(|| StatsError::NotNumeric {
                column: name.clone(),
            })
        })
        .collect::<Result<_, StatsError>>()?;

    let groups = group_rows(table, &spec.group_by)?;

    let rows = groups
        .into_iter()
        .map(|group| {
            let stats = measure_values
                .iter()
                .map(|values| {
                    let selected: Vec<f64> = group.rows.iter().map(|&r| values[r]).collect();
                    SummaryStats::from_values(&selected)
                })
                .collect();

            GroupRow {
                key: group.key,
                rows: group.rows.len(),
                stats,
            }
        })
        .collect();

    Ok(AggregatedTable {
        index_names: spec.group_by.clone(),
        measures: spec.measures.clone(),
        statistics: spec.statistics.clone(),
        groups: rows,
    })
}
