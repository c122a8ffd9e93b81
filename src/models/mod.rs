//! Feature extraction and classification models.
//!
//! A [`Vectorizer`] turns raw comments into a `[batch, n_features]` feature
//! matrix, and a [`SentimentClassifier`] maps that matrix to integer labels.
//! Whether a classifier can also estimate class probabilities is decided once,
//! when it is loaded, by the variant it is wrapped in.
//!
//! ## Main Types
//!
//! - [`TfidfVectorizer`] - persisted TF-IDF vectorizer
//! - [`LogisticRegression`] - linear classifier with probability estimates
//! - [`LinearSvc`] - linear classifier that only produces labels
//! - [`SentimentClassifier`] - the two-variant classifier handle used by the pipeline

pub mod linear;
pub mod tfidf;

pub use linear::{LinearModel, LinearModelArtifact, LinearModelKind, LinearSvc, LogisticRegression};
pub use tfidf::{TfidfNorm, TfidfVectorizer};

use crate::core::{Result, SentimentError};
use candle_core::Tensor;

/// Converts raw text into a fixed-width numeric feature matrix.
pub trait Vectorizer: Send + Sync {
    /// Returns one feature row per input text, in input order.
    fn transform(&self, texts: &[String]) -> Result<Tensor>;
}

/// Maps a feature matrix to one label per row.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &Tensor) -> Result<Vec<i64>>;
}

/// A classifier that can also report per-class probabilities.
pub trait ProbabilisticClassifier: Classifier {
    /// Returns one row per input, one column per class; each row sums to 1.
    fn predict_proba(&self, features: &Tensor) -> Result<Vec<Vec<f64>>>;
}

/// Classifier handle with its probability capability fixed at load time.
pub enum SentimentClassifier {
    Probabilistic(Box<dyn ProbabilisticClassifier>),
    LabelOnly(Box<dyn Classifier>),
}

impl SentimentClassifier {
    pub fn probabilistic(classifier: impl ProbabilisticClassifier + 'static) -> Self {
        SentimentClassifier::Probabilistic(Box::new(classifier))
    }

    pub fn label_only(classifier: impl Classifier + 'static) -> Self {
        SentimentClassifier::LabelOnly(Box::new(classifier))
    }

    /// Whether confidences come from probability estimates.
    pub fn supports_proba(&self) -> bool {
        matches!(self, SentimentClassifier::Probabilistic(_))
    }

    pub fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        match self {
            SentimentClassifier::Probabilistic(classifier) => classifier.predict(features),
            SentimentClassifier::LabelOnly(classifier) => classifier.predict(features),
        }
    }

    /// Predicts labels together with a confidence for each of them.
    ///
    /// The confidence is the highest class probability of the row, or exactly
    /// `1.0` when the classifier has no probability estimates.
    pub fn predict_with_confidence(&self, features: &Tensor) -> Result<(Vec<i64>, Vec<f64>)> {
        match self {
            SentimentClassifier::Probabilistic(classifier) => {
                let labels = classifier.predict(features)?;
                let probabilities = classifier.predict_proba(features)?;
                if probabilities.len() != labels.len() {
                    return Err(SentimentError::Inference(format!(
                        "classifier returned {} probability rows for {} predictions",
                        probabilities.len(),
                        labels.len()
                    )));
                }
                let confidences = probabilities
                    .iter()
                    .map(|row| row.iter().copied().fold(0.0f64, f64::max))
                    .collect();
                Ok((labels, confidences))
            }
            SentimentClassifier::LabelOnly(classifier) => {
                let labels = classifier.predict(features)?;
                let confidences = vec![1.0; labels.len()];
                Ok((labels, confidences))
            }
        }
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentClassifier::Probabilistic(_) => f.write_str("SentimentClassifier::Probabilistic"),
            SentimentClassifier::LabelOnly(_) => f.write_str("SentimentClassifier::LabelOnly"),
        }
    }
}
