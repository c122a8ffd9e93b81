use serde::{Deserialize, Serialize};

/// Label distribution of one batch, serialized as `{"1": .., "0": .., "-1": ..}`.
///
/// Labels outside `{-1, 0, 1}` are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStats {
    #[serde(rename = "1")]
    pub positive: usize,
    #[serde(rename = "0")]
    pub neutral: usize,
    #[serde(rename = "-1")]
    pub negative: usize,
}

impl LabelStats {
    pub fn from_labels(labels: &[i64]) -> Self {
        labels.iter().fold(Self::default(), |mut stats, label| {
            match label {
                1 => stats.positive += 1,
                0 => stats.neutral += 1,
                -1 => stats.negative += 1,
                _ => {}
            }
            stats
        })
    }

    /// Number of labels that were counted.
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}
