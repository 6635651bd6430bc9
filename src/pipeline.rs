//! End-to-end dataset processing.
//!
//! Each dataset runs load → coerce → group/aggregate. Both datasets are
//! aggregated before anything is printed or written, so a failure in either
//! leaves no output files behind from this run.

use crate::analysis::{aggregate, AggregateSpec};
use crate::cli::OutputFormat;
use crate::config::{Config, DatasetConfig};
use crate::dataset::{coerce_to_float, load_csv};
use crate::error::StatsError;
use crate::models::AggregatedTable;
use crate::report;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Load, coerce and aggregate one dataset.
pub fn process_dataset(dataset: &DatasetConfig) -> Result<AggregatedTable, StatsError> {
    let mut table = load_csv(&dataset.input)?;
    info!(
        "Loaded {} rows from {}",
        table.len(),
        dataset.input.display()
    );
    debug!("Columns: {:?}", table.headers());
    if table.is_empty() {
        warn!("{} has no data rows", dataset.input.display());
    }

    coerce_to_float(&mut table, &dataset.measures)?;

    let aggregated = aggregate(&table, &AggregateSpec::from(dataset))?;
    if aggregated.is_empty() && !table.is_empty() {
        warn!("No row of {} has a complete grouping key", dataset.input.display());
    }
    info!(
        "Aggregated {} groups by {}",
        aggregated.len(),
        dataset.group_by.join(", ")
    );

    Ok(aggregated)
}

/// Process every configured dataset, print the tables to `out` and save
/// them as CSV. Returns the paths written.
pub fn run<W: Write>(config: &Config, format: OutputFormat, out: &mut W) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();
    for dataset in config.datasets() {
        let table = process_dataset(dataset)
            .with_context(|| format!("Failed to process {}", dataset.input.display()))?;
        results.push((dataset, table));
    }

    for (dataset, table) in &results {
        writeln!(out, "{}", dataset.title)?;
        match format {
            OutputFormat::Table => write!(out, "{}", report::render_table(table))?,
            OutputFormat::Json => writeln!(out, "{}", report::render_json(table)?)?,
        }
    }
    out.flush()?;

    let mut written = Vec::with_capacity(results.len());
    for (dataset, table) in &results {
        report::write_csv(table, &dataset.output)?;
        info!("Saved statistics to {}", dataset.output.display());
        written.push(dataset.output.clone());
    }

    Ok(written)
}
