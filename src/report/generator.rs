//! Aggregated table rendering and persistence.
//!
//! Tables are printed as aligned text (or JSON) and written to CSV with a
//! three-row header: measured column names, statistic names, then the
//! index column names.

use crate::error::StatsError;
use crate::models::{AggregatedTable, Statistic};
use anyhow::Result;
use std::fs::File;
use std::path::Path;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

/// Render a table as aligned, human-readable text.
///
/// Key columns are left-aligned and statistics right-aligned. Each measured
/// column name sits above the first statistic of its span.
pub fn render_table(table: &AggregatedTable) -> String {
    let pairs = table.column_pairs();
    let per_measure = table.statistics.len();
    let index_blanks = vec![String::new(); table.index_names.len()];
    let mut builder = Builder::default();

    let mut measures = index_blanks.clone();
    measures.extend(pairs.iter().enumerate().map(|(i, (m, _))| {
        if i % per_measure == 0 {
            m.to_string()
        } else {
            String::new()
        }
    }));
    builder.push_record(measures);

    let mut statistics = index_blanks;
    statistics.extend(pairs.iter().map(|(_, s)| s.to_string()));
    builder.push_record(statistics);

    let mut index_names = table.index_names.clone();
    index_names.extend(pairs.iter().map(|_| String::new()));
    builder.push_record(index_names);

    for group in &table.groups {
        let mut record: Vec<String> = group.key.iter().map(|k| k.to_string()).collect();
        record.extend(
            table
                .row_values(group)
                .into_iter()
                .map(|(stat, v)| format_display(stat, v)),
        );
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::blank()).with(Alignment::right());
    rendered.modify(Columns::new(..table.index_names.len()), Alignment::left());

    let mut output = rendered
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    output.push('\n');
    output
}

/// Render a table as pretty-printed JSON. Missing values become `null`.
pub fn render_json(table: &AggregatedTable) -> Result<String> {
    serde_json::to_string_pretty(table).map_err(Into::into)
}

/// CSV rows for a table, header rows included.
pub fn csv_records(table: &AggregatedTable) -> Vec<Vec<String>> {
    let pairs = table.column_pairs();
    let index_blanks = vec![String::new(); table.index_names.len()];
    let mut records = Vec::with_capacity(table.len() + 3);

    let mut measures = index_blanks.clone();
    measures.extend(pairs.iter().map(|(m, _)| m.to_string()));
    records.push(measures);

    let mut statistics = index_blanks;
    statistics.extend(pairs.iter().map(|(_, s)| s.to_string()));
    records.push(statistics);

    let mut index_names = table.index_names.clone();
    index_names.extend(pairs.iter().map(|_| String::new()));
    records.push(index_names);

    for group in &table.groups {
        let mut record: Vec<String> = group.key.iter().map(|k| k.to_string()).collect();
        record.extend(
            table
                .row_values(group)
                .into_iter()
                .map(|(stat, v)| format_csv(stat, v)),
        );
        records.push(record);
    }

    records
}

/// Write a table to `path` as CSV.
pub fn write_csv(table: &AggregatedTable, path: &Path) -> Result<(), StatsError> {
    let file = File::create(path).map_err(|e| StatsError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    for record in csv_records(table) {
        writer
            .write_record(&record)
            .map_err(|e| StatsError::io(path, e.into()))?;
    }

    writer.flush().map_err(|e| StatsError::io(path, e))
}

fn format_display(stat: Statistic, value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if stat.is_integral() {
        format!("{:.0}", value)
    } else if value != 0.0 && value.abs() < 1e-4 {
        format!("{:.6e}", value)
    } else {
        format!("{:.6}", value)
    }
}

fn format_csv(stat: Statistic, value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if stat.is_integral() {
        format!("{:.0}", value)
    } else {
        format!("{:?}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupRow, KeyValue, SummaryStats};
    use tempfile::TempDir;

    fn stats(values: &[f64]) -> SummaryStats {
        SummaryStats::from_values(values)
    }

    fn create_test_table() -> AggregatedTable {
        AggregatedTable {
            index_names: vec!["Libreria".to_string(), "Tamano_Mod".to_string()],
            measures: vec!["T_polinomio".to_string(), "T_NTT".to_string()],
            statistics: vec![Statistic::Mean, Statistic::Std],
            groups: vec![
                GroupRow {
                    key: vec![KeyValue::Text("LibA".to_string()), KeyValue::Integer(1024)],
                    rows: 2,
                    stats: vec![stats(&[2.0, 4.0]), stats(&[1.0, 1.0])],
                },
                GroupRow {
                    key: vec![KeyValue::Text("helib".to_string()), KeyValue::Integer(14)],
                    rows: 1,
                    stats: vec![stats(&[0.25]), stats(&[0.5])],
                },
            ],
        }
    }

    #[test]
    fn test_csv_header_rows() {
        let records = csv_records(&create_test_table());

        assert_eq!(
            records[0],
            vec!["", "", "T_polinomio", "T_polinomio", "T_NTT", "T_NTT"]
        );
        assert_eq!(records[1], vec!["", "", "mean", "std", "mean", "std"]);
        assert_eq!(records[2], vec!["Libreria", "Tamano_Mod", "", "", "", ""]);
        assert_eq!(
            records[3],
            vec!["LibA", "1024", "3.0", "1.4142135623730951", "1.0", "0.0"]
        );
    }

    #[test]
    fn test_csv_nan_is_empty_field() {
        let records = csv_records(&create_test_table());

        assert_eq!(records[4], vec!["helib", "14", "0.25", "", "0.5", ""]);
    }

    #[test]
    fn test_csv_count_is_integer() {
        let mut table = create_test_table();
        table.statistics = vec![Statistic::Count];

        let records = csv_records(&table);

        assert_eq!(records[3], vec!["LibA", "1024", "2", "2"]);
    }

    #[test]
    fn test_write_csv_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("estadisticos_polinomios.csv");
        let table = create_test_table();

        write_csv(&table, &path).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);

        for (group, row) in table.groups.iter().zip(rows.iter().skip(3)) {
            let expected = table.row_values(group);
            for ((_, want), cell) in expected.iter().zip(row.iter().skip(2)) {
                if want.is_nan() {
                    assert!(cell.is_empty());
                } else {
                    let got: f64 = cell.parse().unwrap();
                    assert!((got - want).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_write_csv_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir").join("out.csv");

        let result = write_csv(&create_test_table(), &path);

        assert!(matches!(result, Err(StatsError::Io { .. })));
    }

    #[test]
    fn test_render_table() {
        let text = render_table(&create_test_table());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("T_polinomio"));
        assert!(lines[0].contains("T_NTT"));
        assert!(lines[1].trim_start().starts_with("mean"));
        assert!(lines[2].trim_start().starts_with("Libreria"));
        assert!(lines[2].contains("Tamano_Mod"));
        assert!(lines[3].trim_start().starts_with("LibA"));
        assert!(lines[3].contains("3.000000"));
        assert!(lines[3].contains("1.414214"));
        assert!(lines[4].contains("NaN"));
    }

    #[test]
    fn test_render_table_columns_align() {
        let text = render_table(&create_test_table());
        let lines: Vec<&str> = text.lines().collect();

        // Every data row ends at the same column as the statistic row.
        let width = lines[1].chars().count();
        assert_eq!(lines[3].chars().count(), width);
    }

    #[test]
    fn test_render_tiny_values_in_scientific_notation() {
        let mut table = create_test_table();
        table.groups[0].stats[1] = stats(&[3.0e-7, 3.4e-7]);

        let text = render_table(&table);

        assert!(text.contains("3.200000e-7"));
        assert!(text.contains("2.828427e-8"));
        assert_eq!(format_display(Statistic::Std, 0.0), "0.000000");
        assert_eq!(format_display(Statistic::Mean, 0.25), "0.250000");
    }

    #[test]
    fn test_render_empty_table() {
        let mut table = create_test_table();
        table.groups.clear();

        let text = render_table(&table);

        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&create_test_table()).unwrap();

        assert!(json.contains("\"index_names\""));
        assert!(json.contains("\"LibA\""));
        assert!(json.contains("1024"));
        assert!(json.contains("null"));
    }
}
