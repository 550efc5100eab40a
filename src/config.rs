use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_CHART_SPACES: usize = 4;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppSection,
    pub logging: LoggingSection,
    pub input: InputSection,
    pub output: OutputSection,
    #[serde(default)]
    pub pricing: Option<PricingSection>,
    #[serde(default)]
    pub charting: Option<ChartingSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputSection {
    /// CSV dataset of parking telemetry
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSection {
    /// CSV file receiving one row per priced record
    pub path: PathBuf,
    /// Optional JSON run summary
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSection {
    /// Pricing parameter file selecting the model
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartingSection {
    /// Number of distinct spaces selected for charting (default: 4)
    pub spaces: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_default() -> Result<Config, ConfigError> {
    load_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

impl Config {
    pub fn pricing_path(&self) -> Option<&Path> {
        let path = self.pricing.as_ref()?.path.as_deref()?;
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input.path
    }

    pub fn output_path(&self) -> &Path {
        &self.output.path
    }

    pub fn summary_path(&self) -> Option<&Path> {
        self.output
            .summary_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Returns the number of spaces to chart (default: 4)
    pub fn chart_spaces(&self) -> usize {
        self.charting
            .as_ref()
            .and_then(|c| c.spaces)
            .unwrap_or(DEFAULT_CHART_SPACES)
    }

    /// Returns the configured log level, falling back to INFO when unrecognized.
    pub fn log_level(&self) -> Level {
        self.logging.level.parse().unwrap_or(Level::INFO)
    }
}
