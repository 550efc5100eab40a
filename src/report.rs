//! Persisting a finished pricing run: the CSV result table and a JSON summary.

use crate::table::{PriceStats, PricingOutput};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write results csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("timestamp format error: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunSummary {
    pub model: String,
    #[serde(flatten)]
    pub stats: Option<PriceStats>,
    pub chart_spaces: Vec<String>,
    pub generated_at: String,
}

impl RunSummary {
    pub fn new(
        model: &str,
        output: &PricingOutput,
        chart_spaces: usize,
        generated_at: SystemTime,
    ) -> Result<Self, OutputError> {
        Ok(Self {
            model: model.to_string(),
            stats: output.stats(),
            chart_spaces: output.first_distinct_spaces(chart_spaces),
            generated_at: format_timestamp(generated_at)?,
        })
    }
}

pub fn write_results(output: &PricingOutput, path: impl AsRef<Path>) -> Result<(), OutputError> {
    create_parent_dir(path.as_ref())?;
    let file = File::create(path)?;
    output.write_csv(BufWriter::new(file))?;
    Ok(())
}

pub fn write_summary(summary: &RunSummary, path: impl AsRef<Path>) -> Result<(), OutputError> {
    create_parent_dir(path.as_ref())?;
    let contents = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), std::io::Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn format_timestamp(timestamp: SystemTime) -> Result<String, time::error::Format> {
    OffsetDateTime::from(timestamp).format(&Rfc3339)
}
