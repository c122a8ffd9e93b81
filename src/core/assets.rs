use super::config::ServiceConfig;
use crate::loaders::{ClassifierLoader, VectorizerLoader};
use crate::models::{SentimentClassifier, Vectorizer};
use tracing::{error, info};

/// The vectorizer and classifier shared by every request.
///
/// Built once at startup and never mutated. A failed load leaves both handles
/// unset instead of aborting, so the service can still report its degraded
/// state through the health endpoint.
pub struct LoadedAssets {
    vectorizer: Option<Box<dyn Vectorizer>>,
    classifier: Option<SentimentClassifier>,
}

impl LoadedAssets {
    /// Loads both artifacts from the configured paths.
    pub fn load(config: &ServiceConfig) -> Self {
        info!("Loading vectorizer from {}", config.vectorizer_path.display());
        let vectorizer = match VectorizerLoader::new(&config.vectorizer_path).load() {
            Ok(vectorizer) => vectorizer,
            Err(e) => {
                error!("Failed to load model/vectorizer: {}", e);
                return Self::unloaded();
            }
        };

        info!("Loading model from {}", config.model_path.display());
        let classifier = match ClassifierLoader::new(&config.model_path).load() {
            Ok(classifier) => classifier,
            Err(e) => {
                error!("Failed to load model/vectorizer: {}", e);
                return Self::unloaded();
            }
        };

        info!(
            "Model loaded. predict_proba available: {}",
            classifier.supports_proba()
        );
        Self::from_parts(vectorizer, classifier)
    }

    pub fn from_parts(
        vectorizer: impl Vectorizer + 'static,
        classifier: SentimentClassifier,
    ) -> Self {
        Self {
            vectorizer: Some(Box::new(vectorizer)),
            classifier: Some(classifier),
        }
    }

    /// State after a failed load.
    pub fn unloaded() -> Self {
        Self {
            vectorizer: None,
            classifier: None,
        }
    }

    pub fn vectorizer_loaded(&self) -> bool {
        self.vectorizer.is_some()
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.vectorizer_loaded() && self.model_loaded()
    }

    pub fn supports_proba(&self) -> bool {
        self.classifier
            .as_ref()
            .map_or(false, SentimentClassifier::supports_proba)
    }

    /// Both handles, or `None` when loading failed.
    pub fn get(&self) -> Option<(&dyn Vectorizer, &SentimentClassifier)> {
        match (&self.vectorizer, &self.classifier) {
            (Some(vectorizer), Some(classifier)) => Some((&**vectorizer, classifier)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for LoadedAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedAssets")
            .field("vectorizer_loaded", &self.vectorizer_loaded())
            .field("model_loaded", &self.model_loaded())
            .field("supports_proba", &self.supports_proba())
            .finish()
    }
}
