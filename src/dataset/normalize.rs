//! Numeric coercion of measured columns.

use crate::error::StatsError;
use crate::models::{ColumnData, Table};

/// Replace each named column's cells with their `f64` values, in place.
///
/// Empty cells are missing values and become `NaN`. Any other cell that
/// does not parse as a float fails the whole call; there is no partial
/// tolerance. Columns not named are left untouched.
pub fn coerce_to_float(table: &mut Table, columns: &[String]) -> Result<(), StatsError> {
    for name in columns {
        let column = table
            .column_mut(name)
            .ok_or_else(|| StatsError::MissingColumn {
                column: name.clone(),
            })?;

        let floats = match &column.data {
            ColumnData::Float(_) => continue,
            ColumnData::Text(cells) => parse_cells(name, cells)?,
        };

        column.data = ColumnData::Float(floats);
    }

    Ok(())
}

fn parse_cells(column: &str, cells: &[String]) -> Result<Vec<f64>, StatsError> {
    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            parse_cell(cell).ok_or_else(|| StatsError::ValueConversion {
                column: column.to_string(),
                row: idx + 1,
                value: cell.clone(),
            })
        })
        .collect()
}

fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Some(f64::NAN);
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_text_rows(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coerce_named_columns_only() {
        let mut t = table(
            &["Libreria", "Tamano_Mod", "T_NTT"],
            &[&["helib", "14", "1.25"], &["helib", "14", " 2e-3 "]],
        );

        coerce_to_float(&mut t, &names(&["T_NTT"])).unwrap();

        assert_eq!(
            t.column("T_NTT").unwrap().data,
            ColumnData::Float(vec![1.25, 0.002])
        );
        assert_eq!(
            t.column("Tamano_Mod").unwrap().data,
            ColumnData::Text(names(&["14", "14"]))
        );
    }

    #[test]
    fn test_coerce_rejects_not_available() {
        let mut t = table(&["T_polinomio"], &[&["2.0"], &["N/A"]]);

        let err = coerce_to_float(&mut t, &names(&["T_polinomio"])).unwrap_err();

        match err {
            StatsError::ValueConversion { column, row, value } => {
                assert_eq!(column, "T_polinomio");
                assert_eq!(row, 2);
                assert_eq!(value, "N/A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_coerce_empty_cell_is_nan() {
        let mut t = table(&["T_context"], &[&[""], &["0.5"]]);

        coerce_to_float(&mut t, &names(&["T_context"])).unwrap();

        let values = t.column("T_context").unwrap().data.as_floats().unwrap();
        assert!(values[0].is_nan());
        assert_eq!(values[1], 0.5);
    }

    #[test]
    fn test_coerce_missing_column() {
        let mut t = table(&["T_suma"], &[&["1"]]);

        let err = coerce_to_float(&mut t, &names(&["T_multiplicacion"])).unwrap_err();

        assert!(matches!(err, StatsError::MissingColumn { column } if column == "T_multiplicacion"));
    }

    #[test]
    fn test_coerce_is_idempotent() {
        let mut t = table(&["T_INTT"], &[&["3"]]);
        let cols = names(&["T_INTT"]);

        coerce_to_float(&mut t, &cols).unwrap();
        coerce_to_float(&mut t, &cols).unwrap();

        assert_eq!(t.column("T_INTT").unwrap().data, ColumnData::Float(vec![3.0]));
    }
}
