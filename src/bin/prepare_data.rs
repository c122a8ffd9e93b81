//! Offline dataset preparation: download, clean and split the labeled comments.
//!
//! ```text
//! prepare-data download [URL] [RAW_PATH]
//! prepare-data clean [RAW_PATH] [CLEAN_PATH]
//! prepare-data split [CLEAN_PATH] [TRAIN_PATH] [TEST_PATH]
//! prepare-data all
//! ```

use anyhow::{bail, Result};
use comment_sentiment::dataset::{
    self, clean_dataset, download_dataset, split_dataset, SplitConfig, DEFAULT_DATASET_URL,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: prepare-data <download|clean|split|all> [paths...]";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(step) = args.first() else {
        bail!(USAGE);
    };
    let arg = |index: usize, default: &str| -> String {
        args.get(index).cloned().unwrap_or_else(|| default.to_string())
    };

    match step.as_str() {
        "download" => {
            let url = arg(1, DEFAULT_DATASET_URL);
            download_dataset(&url, &PathBuf::from(arg(2, dataset::RAW_PATH))).await?;
        }
        "clean" => {
            clean_dataset(
                &PathBuf::from(arg(1, dataset::RAW_PATH)),
                &PathBuf::from(arg(2, dataset::CLEAN_PATH)),
            )?;
        }
        "split" => {
            split_dataset(
                &PathBuf::from(arg(1, dataset::CLEAN_PATH)),
                &PathBuf::from(arg(2, dataset::TRAIN_PATH)),
                &PathBuf::from(arg(3, dataset::TEST_PATH)),
                SplitConfig::default(),
            )?;
        }
        "all" => {
            let raw = PathBuf::from(dataset::RAW_PATH);
            let clean = PathBuf::from(dataset::CLEAN_PATH);
            download_dataset(DEFAULT_DATASET_URL, &raw).await?;
            clean_dataset(&raw, &clean)?;
            split_dataset(
                &clean,
                &PathBuf::from(dataset::TRAIN_PATH),
                &PathBuf::from(dataset::TEST_PATH),
                SplitConfig::default(),
            )?;
        }
        other => bail!("unknown step '{other}'; {USAGE}"),
    }

    Ok(())
}
