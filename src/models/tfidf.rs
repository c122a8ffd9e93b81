use super::Vectorizer;
use crate::core::{Result, SentimentError};
use candle_core::{Device, Tensor};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Word tokens of at least two Unicode word characters.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Row normalization applied after IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TfidfNorm {
    L1,
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<TfidfNorm> {
    Some(TfidfNorm::L2)
}

/// On-disk form of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f32>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<TfidfNorm>,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

/// A fitted TF-IDF vectorizer producing dense `f32` rows on the CPU.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    ngram_range: (usize, usize),
    lowercase: bool,
    sublinear_tf: bool,
    binary: bool,
    norm: Option<TfidfNorm>,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Validates a deserialized artifact and turns it into a usable vectorizer.
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        if artifact.vocabulary.is_empty() {
            return Err(SentimentError::ArtifactFormat(
                "vectorizer vocabulary is empty".to_string(),
            ));
        }
        if let Some((term, column)) = artifact
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= artifact.idf.len())
        {
            return Err(SentimentError::ArtifactFormat(format!(
                "term '{term}' maps to column {column} but only {} idf weights exist",
                artifact.idf.len()
            )));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SentimentError::ArtifactFormat(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            norm: artifact.norm,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Width of every feature row.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Splits a text into the terms looked up in the vocabulary.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    fn weigh_row(&self, text: &str, row: &mut [f32]) {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        for (column, count) in counts {
            let tf = if self.binary {
                1.0
            } else if self.sublinear_tf {
                1.0 + count.ln()
            } else {
                count
            };
            row[column] = tf * self.idf[column];
        }

        let norm = match self.norm {
            Some(TfidfNorm::L2) => row.iter().map(|v| v * v).sum::<f32>().sqrt(),
            Some(TfidfNorm::L1) => row.iter().map(|v| v.abs()).sum::<f32>(),
            None => return,
        };
        if norm > 0.0 {
            row.iter_mut().for_each(|v| *v /= norm);
        }
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, texts: &[String]) -> Result<Tensor> {
        let width = self.n_features();
        let mut data = vec![0.0f32; texts.len() * width];
        for (text, row) in texts.iter().zip(data.chunks_mut(width)) {
            self.weigh_row(text, row);
        }
        Ok(Tensor::from_vec(data, (texts.len(), width), &Device::Cpu)?)
    }
}
