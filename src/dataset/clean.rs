use super::{read_csv_file, write_records, RawRecord, Record};
use crate::core::{Result, SentimentError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::info;

static URLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+").expect("valid url pattern"));
static MENTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention pattern"));
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").expect("valid character pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space pattern"));

/// Strips links, mentions and punctuation, lowercases and collapses whitespace.
pub fn clean_text(text: &str) -> String {
    let text = URLS.replace_all(text, "");
    let text = MENTIONS.replace_all(&text, "");
    let text = NON_ALPHANUMERIC.replace_all(&text, " ");
    let text = text.to_lowercase();
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Cleans every row and keeps those with a sentiment label and some text left.
pub fn clean_records(rows: Vec<RawRecord>) -> Vec<Record> {
    rows.into_iter()
        .filter_map(RawRecord::into_valid)
        .map(|record| Record {
            text: clean_text(&record.text),
            label: record.label,
        })
        .filter(|record| !record.text.is_empty())
        .collect()
}

/// Reads the raw CSV, cleans it and writes the `text,label` result.
pub fn clean_dataset(input_path: &Path, output_path: &Path) -> Result<Vec<Record>> {
    info!("Loading raw data from {} for cleaning", input_path.display());
    if !input_path.exists() {
        return Err(SentimentError::Dataset(format!(
            "raw file not found at {}, run the download step first",
            input_path.display()
        )));
    }
    let rows = read_csv_file(input_path)?;

    info!("Cleaning {} rows", rows.len());
    let records = clean_records(rows);
    write_records(output_path, &records)?;
    info!(
        "Saved cleaned dataset: {} rows in {}",
        records.len(),
        output_path.display()
    );
    Ok(records)
}
