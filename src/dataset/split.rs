use super::{label_distribution, read_csv_file, write_records, RawRecord, Record};
use crate::core::{Result, SentimentError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

pub const RANDOM_SEED: u64 = 42;
pub const TEST_SIZE: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    /// Share of each class that goes to the test split.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: TEST_SIZE,
            seed: RANDOM_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// Whether minority classes were oversampled.
    pub oversampled: bool,
    pub train: usize,
    pub test: usize,
}

/// Mean length of the comments, in characters.
pub fn mean_text_length(records: &[Record]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: usize = records.iter().map(|r| r.text.chars().count()).sum();
    total as f64 / records.len() as f64
}

/// Oversamples every minority class, with replacement, up to the majority
/// class count and shuffles the result. Returns `None` when the classes are
/// already balanced.
pub fn oversample(records: &[Record], rng: &mut StdRng) -> Option<Vec<Record>> {
    let groups = group_by_label(records);
    let majority = groups.values().map(Vec::len).max()?;
    if groups.values().all(|group| group.len() == majority) {
        return None;
    }

    let mut balanced = records.to_vec();
    for group in groups.values() {
        for _ in group.len()..majority {
            let pick = rng.random_range(0..group.len());
            balanced.push(group[pick].clone());
        }
    }
    balanced.shuffle(rng);
    Some(balanced)
}

/// Splits each class separately so both sides keep the class proportions.
pub fn stratified_split(
    records: &[Record],
    test_size: f64,
    rng: &mut StdRng,
) -> (Vec<Record>, Vec<Record>) {
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (_, mut group) in group_by_label(records) {
        group.shuffle(rng);
        let n_test = ((group.len() as f64 * test_size).round() as usize).min(group.len());
        let rest = group.split_off(n_test);
        test.extend(group);
        train.extend(rest);
    }

    train.shuffle(rng);
    test.shuffle(rng);
    (train, test)
}

fn group_by_label(records: &[Record]) -> BTreeMap<i64, Vec<Record>> {
    let mut groups: BTreeMap<i64, Vec<Record>> = BTreeMap::new();
    for record in records {
        groups.entry(record.label).or_default().push(record.clone());
    }
    groups
}

/// Reads the cleaned CSV, rebalances it and writes the train and test splits.
pub fn split_dataset(
    input_path: &Path,
    train_path: &Path,
    test_path: &Path,
    config: SplitConfig,
) -> Result<SplitSummary> {
    if !(0.0..1.0).contains(&config.test_size) {
        return Err(SentimentError::Dataset(format!(
            "test_size must be in [0, 1), got {}",
            config.test_size
        )));
    }

    info!("Loading cleaned dataset from {}", input_path.display());
    let records: Vec<Record> = read_csv_file(input_path)?
        .into_iter()
        .filter_map(RawRecord::into_valid)
        .filter(|record| !record.text.is_empty())
        .collect();
    if records.is_empty() {
        return Err(SentimentError::Dataset(format!(
            "no labeled comments in {}",
            input_path.display()
        )));
    }

    info!("Mean text length: {:.2}", mean_text_length(&records));
    for (label, count) in label_distribution(&records) {
        info!("label {:>2}: {}", label, count);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (records, oversampled) = match oversample(&records, &mut rng) {
        Some(balanced) => {
            info!("Class imbalance detected, oversampled minority classes");
            for (label, count) in label_distribution(&balanced) {
                info!("label {:>2}: {}", label, count);
            }
            (balanced, true)
        }
        None => {
            info!("Classes already balanced, no oversampling applied");
            (records, false)
        }
    };

    let (train, test) = stratified_split(&records, config.test_size, &mut rng);
    write_records(train_path, &train)?;
    write_records(test_path, &test)?;
    info!("Saved train split: {} rows in {}", train.len(), train_path.display());
    info!("Saved test split: {} rows in {}", test.len(), test_path.display());

    for (label, count) in label_distribution(&train) {
        info!(
            "train label {:>2}: {:.3}",
            label,
            count as f64 / train.len().max(1) as f64
        );
    }

    Ok(SplitSummary {
        oversampled,
        train: train.len(),
        test: test.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(counts: &[(i64, usize)]) -> Vec<Record> {
        counts
            .iter()
            .flat_map(|&(label, n)| {
                (0..n).map(move |i| Record {
                    text: format!("comment {label} {i}"),
                    label,
                })
            })
            .collect()
    }

    #[test]
    fn oversampling_balances_every_class() {
        let data = records(&[(-1, 3), (0, 5), (1, 10)]);
        let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
        let balanced = oversample(&data, &mut rng).unwrap();

        let distribution = label_distribution(&balanced);
        assert!(distribution.values().all(|&count| count == 10));
        for original in &data {
            assert!(balanced.contains(original));
        }
    }

    #[test]
    fn balanced_data_is_left_alone() {
        let data = records(&[(-1, 4), (1, 4)]);
        let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
        assert!(oversample(&data, &mut rng).is_none());
    }

    #[test]
    fn split_keeps_class_proportions() {
        let data = records(&[(-1, 50), (0, 50), (1, 100)]);
        let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
        let (train, test) = stratified_split(&data, 0.2, &mut rng);

        assert_eq!(train.len() + test.len(), 200);
        let test_distribution = label_distribution(&test);
        assert_eq!(test_distribution[&-1], 10);
        assert_eq!(test_distribution[&0], 10);
        assert_eq!(test_distribution[&1], 20);
        assert!(test.iter().all(|r| !train.contains(r)));
    }

    #[test]
    fn split_is_reproducible_for_a_seed() {
        let data = records(&[(-1, 7), (0, 9), (1, 11)]);
        let first = stratified_split(&data, 0.2, &mut StdRng::seed_from_u64(7));
        let second = stratified_split(&data, 0.2, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn mean_length_counts_characters() {
        let data = vec![
            Record { text: "abcd".into(), label: 1 },
            Record { text: "éé".into(), label: 0 },
        ];
        assert!((mean_text_length(&data) - 3.0).abs() < 1e-9);
        assert_eq!(mean_text_length(&[]), 0.0);
    }

    #[test]
    fn split_dataset_writes_both_files() {
        let dir = std::env::temp_dir().join(format!("comment-sentiment-split-{}", std::process::id()));
        let input = dir.join("clean.csv");
        let train_path = dir.join("train.csv");
        let test_path = dir.join("test.csv");
        write_records(&input, &records(&[(-1, 5), (0, 10), (1, 20)])).unwrap();

        let summary =
            split_dataset(&input, &train_path, &test_path, SplitConfig::default()).unwrap();

        assert!(summary.oversampled);
        assert_eq!(summary.train + summary.test, 60);
        assert_eq!(summary.test, 12);
        let written = read_csv_file(&test_path).unwrap();
        assert_eq!(written.len(), summary.test);
    }
}
