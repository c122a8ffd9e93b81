//! Offline preparation of the labeled comment dataset.
//!
//! The steps run in order and each one reads the previous step's CSV:
//! 1. [`download`] fetches the raw dataset and normalizes its column names
//! 2. [`clean`] normalizes comment text and drops unusable rows
//! 3. [`split`] rebalances the classes and writes a stratified train/test split
//!
//! Every CSV written here has the header `text,label`.

pub mod clean;
pub mod download;
pub mod split;

pub use clean::{clean_dataset, clean_text};
pub use download::{download_dataset, DEFAULT_DATASET_URL};
pub use split::{split_dataset, SplitConfig, SplitSummary};

use crate::core::{Result, SentimentError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

pub const VALID_LABELS: [i64; 3] = [-1, 0, 1];

pub const RAW_PATH: &str = "data/raw/reddit.csv";
pub const CLEAN_PATH: &str = "data/processed/reddit_clean.csv";
pub const TRAIN_PATH: &str = "data/processed/reddit_train.csv";
pub const TEST_PATH: &str = "data/processed/reddit_test.csv";

/// Header names accepted for the comment text column.
const TEXT_COLUMNS: [&str; 2] = ["text", "clean_comment"];
/// Header names accepted for the label column.
const LABEL_COLUMNS: [&str; 2] = ["label", "category"];

/// A comment whose label has not been checked yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub text: String,
    pub label: Option<i64>,
}

/// A comment with a sentiment label in `{-1, 0, 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    pub label: i64,
}

impl RawRecord {
    /// Keeps the row only when its label is one of the sentiment labels.
    pub fn into_valid(self) -> Option<Record> {
        match self.label {
            Some(label) if VALID_LABELS.contains(&label) => Some(Record {
                text: self.text,
                label,
            }),
            _ => None,
        }
    }
}

/// Parses a numeric label, accepting integral floats such as `1.0`.
pub fn parse_label(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(label) = raw.parse::<i64>() {
        return Some(label);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .map(|value| value as i64)
}

/// Reads a labeled CSV, locating the text and label columns by header name.
pub fn read_labeled_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| headers.iter().position(|header| header.trim() == *name))
    };
    let text_index = find(&TEXT_COLUMNS).ok_or_else(|| {
        SentimentError::Dataset(format!("no text column, expected one of {TEXT_COLUMNS:?}"))
    })?;
    let label_index = find(&LABEL_COLUMNS).ok_or_else(|| {
        SentimentError::Dataset(format!("no label column, expected one of {LABEL_COLUMNS:?}"))
    })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawRecord {
            text: record.get(text_index).unwrap_or_default().to_string(),
            label: record.get(label_index).and_then(parse_label),
        });
    }
    Ok(rows)
}

/// Reads a `text,label` CSV from disk.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            SentimentError::Dataset(format!("file not found: {}", path.display()))
        }
        _ => SentimentError::Io(e),
    })?;
    read_labeled_csv(file)
}

/// Writes rows as a `text,label` CSV, creating parent directories.
pub fn write_raw_records(path: &Path, rows: &[RawRecord]) -> Result<()> {
    let mut writer = csv_writer(path)?;
    for row in rows {
        let label = row.label.map(|l| l.to_string()).unwrap_or_default();
        writer.write_record([row.text.as_str(), label.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes labeled records as a `text,label` CSV, creating parent directories.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv_writer(path)?;
    for record in records {
        writer.write_record([record.text.as_str(), record.label.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["text", "label"])?;
    Ok(writer)
}

/// Number of records per label, ordered by label.
pub fn label_distribution(records: &[Record]) -> BTreeMap<i64, usize> {
    let mut distribution = BTreeMap::new();
    for record in records {
        *distribution.entry(record.label).or_insert(0) += 1;
    }
    distribution
}
