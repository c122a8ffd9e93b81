//! Artifact loading utilities for the persisted vectorizer and classifier.
//!
//! Both artifacts are JSON documents on the local filesystem:
//! - [`VectorizerLoader`] reads a [`TfidfVectorizer`]
//! - [`ClassifierLoader`] reads a linear classifier and picks its
//!   [`SentimentClassifier`] variant from the persisted `kind`
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use comment_sentiment::loaders::{ClassifierLoader, VectorizerLoader};
//!
//! let vectorizer = VectorizerLoader::new("models/tfidf_vectorizer.json").load()?;
//! let classifier = ClassifierLoader::new("models/sentiment_model.json").load()?;
//! println!("probabilities: {}", classifier.supports_proba());
//! # Ok::<(), comment_sentiment::core::SentimentError>(())
//! ```

use crate::core::{Result, SentimentError};
use crate::models::tfidf::TfidfArtifact;
use crate::models::{LinearModelArtifact, SentimentClassifier, TfidfVectorizer};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Reads one JSON artifact from disk.
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    pub path: PathBuf,
}

impl ArtifactLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                SentimentError::ArtifactNotFound(self.path.display().to_string())
            }
            _ => SentimentError::Io(e),
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SentimentError::ArtifactFormat(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[derive(Debug, Clone)]
pub struct VectorizerLoader {
    pub artifact_loader: ArtifactLoader,
}

impl VectorizerLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            artifact_loader: ArtifactLoader::new(path.as_ref()),
        }
    }

    pub fn load(&self) -> Result<TfidfVectorizer> {
        let artifact: TfidfArtifact = self.artifact_loader.load()?;
        TfidfVectorizer::from_artifact(artifact)
    }
}

#[derive(Debug, Clone)]
pub struct ClassifierLoader {
    pub artifact_loader: ArtifactLoader,
}

impl ClassifierLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            artifact_loader: ArtifactLoader::new(path.as_ref()),
        }
    }

    pub fn load(&self) -> Result<SentimentClassifier> {
        let artifact: LinearModelArtifact = self.artifact_loader.load()?;
        artifact.into_classifier()
    }
}
