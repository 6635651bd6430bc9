//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap. Every flag is
//! optional: a bare `benchstats` processes both datasets with the built-in
//! configuration.

use clap::Parser;
use std::path::PathBuf;

/// benchstats - grouped statistics over FHE benchmark results
///
/// Reads the polynomial and FHE scheme timing CSVs, computes the mean and
/// sample standard deviation of every timing per library and modulus size
/// (or security level), prints both tables and saves them as CSV.
///
/// Examples:
///   benchstats
///   benchstats --format json
///   benchstats --config bench.toml --verbose
///   benchstats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .benchstats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format for the printed tables (table, json)
    #[arg(long, default_value = "table", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Generate a default .benchstats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// How aggregated tables are printed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
