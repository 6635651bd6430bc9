//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.benchstats.toml` files. Every field has a default, so running without a
//! config file processes the two benchmark datasets at their usual paths.

use crate::models::Statistic;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".benchstats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,

    /// Polynomial arithmetic timings.
    pub polynomials: DatasetConfig,

    /// FHE scheme timings.
    pub fhe_schemes: DatasetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            polynomials: DatasetConfig::polynomials(),
            fhe_schemes: DatasetConfig::fhe_schemes(),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// One dataset pipeline: where to read, how to group, where to write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetConfig {
    /// Line printed above the table.
    pub title: String,
    /// Input CSV path.
    pub input: PathBuf,
    /// Output CSV path.
    pub output: PathBuf,
    /// Grouping-key columns.
    pub group_by: Vec<String>,
    /// Measured columns, coerced to float.
    pub measures: Vec<String>,
    /// Statistics per measured column.
    pub statistics: Vec<Statistic>,
}

/// On-disk layout: every dataset field is optional and falls back to that
/// dataset's built-in value.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfig,
    #[serde(default)]
    polynomials: DatasetOverrides,
    #[serde(default)]
    fhe_schemes: DatasetOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct DatasetOverrides {
    title: Option<String>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    group_by: Option<Vec<String>>,
    measures: Option<Vec<String>>,
    statistics: Option<Vec<Statistic>>,
}

impl DatasetOverrides {
    fn apply(self, base: DatasetConfig) -> DatasetConfig {
        DatasetConfig {
            title: self.title.unwrap_or(base.title),
            input: self.input.unwrap_or(base.input),
            output: self.output.unwrap_or(base.output),
            group_by: self.group_by.unwrap_or(base.group_by),
            measures: self.measures.unwrap_or(base.measures),
            statistics: self.statistics.unwrap_or(base.statistics),
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            general: file.general,
            polynomials: file.polynomials.apply(DatasetConfig::polynomials()),
            fhe_schemes: file.fhe_schemes.apply(DatasetConfig::fhe_schemes()),
        }
    }
}

impl DatasetConfig {
    /// Polynomial arithmetic benchmark dataset.
    pub fn polynomials() -> Self {
        Self {
            title: "Estadísticas de los polinomios".to_string(),
            input: PathBuf::from("analisis_datos/statistics_backup.csv"),
            output: PathBuf::from("estadisticos_polinomios.csv"),
            group_by: strings(&["Libreria", "Tamano_Mod"]),
            measures: strings(&[
                "T_polinomio",
                "T_NTT",
                "T_suma",
                "T_multiplicacion",
                "T_INTT",
            ]),
            statistics: default_statistics(),
        }
    }

    /// FHE scheme benchmark dataset.
    pub fn fhe_schemes() -> Self {
        Self {
            title: "Estadísticas de los esquemas FHE".to_string(),
            input: PathBuf::from("analisis_datos/he_schemes_backup.csv"),
            output: PathBuf::from("estadisticos_esquemasFHE.csv"),
            group_by: strings(&["Libreria", "Sec_Level"]),
            measures: strings(&[
                "T_keygen",
                "T_cifardo",
                "T_suma",
                "T_multiplicacion",
                "T_descifrado",
                "T_context",
            ]),
            statistics: default_statistics(),
        }
    }
}

fn default_statistics() -> Vec<Statistic> {
    vec![Statistic::Mean, Statistic::Std]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load `.benchstats.toml` from a directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI flags take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Datasets in processing order.
    pub fn datasets(&self) -> [&DatasetConfig; 2] {
        [&self.polynomials, &self.fhe_schemes]
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
