//! CSV loader.
//!
//! Reads a header row plus data rows into an all-text [`Table`]. Typing is
//! left to the normalizer and the grouper.

use crate::error::StatsError;
use crate::models::Table;
use std::collections::HashSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Load a CSV file whose first row is the header.
///
/// Columns keep the header's order. A header-only file yields an empty
/// table; a file with no header row at all, or with a repeated column
/// name, is a parse error.
pub fn load_csv(path: &Path) -> Result<Table, StatsError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StatsError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StatsError::io(path, e)
        }
    })?;

    let table = read_csv(file, path)?;
    debug!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );

    Ok(table)
}

/// Parse CSV from any reader; `path` is only used for error reporting.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Table, StatsError> {
    let parse_err = |source: csv::Error| StatsError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(parse_err(csv::Error::from(std::io::Error::new(
            ErrorKind::InvalidData,
            "missing header row",
        ))));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(parse_err(csv::Error::from(std::io::Error::new(
            ErrorKind::InvalidData,
            format!("duplicate column '{}' in header", duplicate),
        ))));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(parse_err)?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(Table::from_text_rows(headers, rows))
}
