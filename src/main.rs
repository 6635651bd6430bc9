//! benchstats - FHE benchmark results analyzer
//!
//! A CLI tool that groups polynomial-arithmetic and FHE-scheme benchmark
//! timings by library and modulus size / security level, reports the mean
//! and sample standard deviation of every timing, and saves the tables as
//! CSV.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing input, malformed CSV, unwritable output, etc.)

mod analysis;
mod cli;
mod config;
mod dataset;
mod error;
mod models;
mod pipeline;
mod report;

use anyhow::{bail, Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let (config, source) = match load_config_in(&args, Path::new(".")) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&args, &config);

    info!("benchstats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match source {
        ConfigSource::File(ref path) => info!("Loaded config from {}", path),
        ConfigSource::Defaults => debug!("No config file found, using defaults"),
        ConfigSource::BrokenDefault(ref e) => warn!("Failed to load config: {}", e),
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match pipeline::run(&config, args.format, &mut out) {
        Ok(written) => {
            debug!("Wrote {} files", written.len());
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .benchstats.toml.
fn handle_init_config() -> Result<()> {
    if let Err(e) = write_default_config(Path::new(DEFAULT_CONFIG_FILE)) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Write the default configuration to `path`, refusing to overwrite.
fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "{} already exists. Remove it first or edit it manually.",
            path.display()
        );
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Where the effective configuration came from; logged once logging is up.
enum ConfigSource {
    File(String),
    Defaults,
    BrokenDefault(String),
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` file must parse; a broken default file in `dir`
/// is reported and ignored.
fn load_config_in(args: &Args, dir: &Path) -> Result<(Config, ConfigSource)> {
    if let Some(ref config_path) = args.config {
        let mut config = Config::load(config_path)?;
        config.merge_with_args(args);
        return Ok((config, ConfigSource::File(config_path.display().to_string())));
    }

    let (mut config, source) = match Config::load_from_dir(dir) {
        Ok(Some(config)) => (
            config,
            ConfigSource::File(dir.join(DEFAULT_CONFIG_FILE).display().to_string()),
        ),
        Ok(None) => (Config::default(), ConfigSource::Defaults),
        Err(e) => (
            Config::default(),
            ConfigSource::BrokenDefault(format!("{:#}", e)),
        ),
    };
    config.merge_with_args(args);

    Ok((config, source))
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; stdout carries only the printed tables.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
