//! CSV record source.

use crate::record::Record;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset: {0}")]
    Open(#[from] std::io::Error),
    #[error("failed to read dataset header: {0}")]
    Header(csv::Error),
    #[error("malformed record on line {line}: {source}")]
    Row { line: u64, source: csv::Error },
}

/// Shape of a loaded dataset, reported before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOverview {
    pub total_records: usize,
    pub unique_spaces: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl DatasetOverview {
    pub fn of(records: &[Record]) -> Self {
        let unique_spaces = records
            .iter()
            .map(|record| record.space_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        Self {
            total_records: records.len(),
            unique_spaces,
            first_date: records.iter().map(|r| &r.date).min().cloned(),
            last_date: records.iter().map(|r| &r.date).max().cloned(),
        }
    }
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Record>, DatasetError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// Read every record; extra columns are ignored and surrounding whitespace trimmed.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Record>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    reader.headers().map_err(DatasetError::Header)?;

    let mut records = Vec::new();
    for result in reader.deserialize::<Record>() {
        let record = result.map_err(|source| DatasetError::Row {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
