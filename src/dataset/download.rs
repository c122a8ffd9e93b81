use super::{
    label_distribution, read_csv_file, read_labeled_csv, write_raw_records, RawRecord, Record,
};
use crate::core::Result;
use std::path::Path;
use tracing::{info, warn};

/// Reddit comments labeled -1 / 0 / 1 (`clean_comment`, `category` columns).
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/Himanshu-1703/reddit-sentiment-analysis/refs/heads/main/data/reddit.csv";

/// Downloads the dataset to `raw_path` and returns its validly labeled rows.
///
/// When the download fails and `raw_path` already exists, the existing file
/// is used instead.
pub async fn download_dataset(url: &str, raw_path: &Path) -> Result<Vec<Record>> {
    info!("Downloading dataset from {}", url);
    let rows = match fetch_rows(url).await {
        Ok(rows) => {
            write_raw_records(raw_path, &rows)?;
            info!("Saved raw dataset to {}", raw_path.display());
            rows
        }
        Err(e) if raw_path.exists() => {
            warn!(
                "Download failed ({}), reading existing file {}",
                e,
                raw_path.display()
            );
            read_csv_file(raw_path)?
        }
        Err(e) => return Err(e),
    };

    info!("Total comments: {}", rows.len());
    let records: Vec<Record> = rows.into_iter().filter_map(RawRecord::into_valid).collect();
    for (label, count) in label_distribution(&records) {
        info!("label {:>2}: {}", label, count);
    }
    Ok(records)
}

async fn fetch_rows(url: &str) -> Result<Vec<RawRecord>> {
    let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;
    read_labeled_csv(&body[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SentimentError;

    const UNREACHABLE_URL: &str = "http://127.0.0.1:1/reddit.csv";

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "comment-sentiment-download-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn failed_download_reads_existing_raw_file() {
        let dir = scratch_dir("fallback");
        let raw = dir.join("reddit.csv");
        std::fs::write(&raw, "text,label\ngood,1\nbad,-1\nodd,5\n").unwrap();

        let records = download_dataset(UNREACHABLE_URL, &raw).await.unwrap();
        assert_eq!(
            records,
            vec![
                Record { text: "good".into(), label: 1 },
                Record { text: "bad".into(), label: -1 },
            ]
        );
        assert!(std::fs::read_to_string(&raw).unwrap().contains("odd,5"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn failed_download_without_raw_file_is_an_error() {
        let dir = scratch_dir("missing");
        let raw = dir.join("reddit.csv");

        let err = download_dataset(UNREACHABLE_URL, &raw).await.unwrap_err();
        assert!(matches!(err, SentimentError::Http(_)), "{err}");
        assert!(!raw.exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
