//! Linear classifiers over TF-IDF features.
//!
//! Decision scores are `features · coefᵀ + intercept`, computed with a
//! [`candle_nn::Linear`] layer on the CPU. Two persisted kinds exist: logistic
//! regression, which also estimates class probabilities, and a linear SVM,
//! which only produces labels.

use super::{Classifier, ProbabilisticClassifier, SentimentClassifier};
use crate::core::{Result, SentimentError};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Linear, Module};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearModelKind {
    LogisticRegression,
    LinearSvc,
}

/// How logistic regression turns scores into probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// On-disk form of a fitted linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub kind: LinearModelKind,
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

impl LinearModelArtifact {
    /// Validates the artifact and wraps it in the classifier variant its kind calls for.
    pub fn into_classifier(self) -> Result<SentimentClassifier> {
        let kind = self.kind;
        let model = LinearModel::from_artifact(self)?;
        Ok(match kind {
            LinearModelKind::LogisticRegression => {
                SentimentClassifier::probabilistic(LogisticRegression(model))
            }
            LinearModelKind::LinearSvc => SentimentClassifier::label_only(LinearSvc(model)),
        })
    }
}

/// Weights shared by both linear classifier kinds.
#[derive(Debug, Clone)]
pub struct LinearModel {
    classes: Vec<i64>,
    layer: Linear,
    n_features: usize,
    binary: bool,
    multi_class: MultiClass,
}

impl LinearModel {
    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self> {
        let LinearModelArtifact {
            classes,
            coef,
            intercept,
            multi_class,
            ..
        } = artifact;

        if classes.len() < 2 {
            return Err(SentimentError::ArtifactFormat(format!(
                "classifier needs at least 2 classes, found {}",
                classes.len()
            )));
        }
        let binary = classes.len() == 2 && coef.len() == 1;
        if !binary && coef.len() != classes.len() {
            return Err(SentimentError::ArtifactFormat(format!(
                "{} coefficient rows for {} classes",
                coef.len(),
                classes.len()
            )));
        }
        let n_features = coef.first().map_or(0, Vec::len);
        if n_features == 0 || coef.iter().any(|row| row.len() != n_features) {
            return Err(SentimentError::ArtifactFormat(
                "coefficient rows must share the same non-zero width".to_string(),
            ));
        }
        if intercept.len() != coef.len() {
            return Err(SentimentError::ArtifactFormat(format!(
                "{} intercepts for {} coefficient rows",
                intercept.len(),
                coef.len()
            )));
        }

        let rows = coef.len();
        let flat: Vec<f32> = coef.into_iter().flatten().collect();
        let weight = Tensor::from_vec(flat, (rows, n_features), &Device::Cpu)?;
        let bias = Tensor::from_vec(intercept, rows, &Device::Cpu)?;

        Ok(Self {
            classes,
            layer: Linear::new(weight, Some(bias)),
            n_features,
            binary,
            multi_class,
        })
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Raw scores, `[batch, rows]` where rows is 1 for a binary model.
    pub fn decision_function(&self, features: &Tensor) -> Result<Tensor> {
        let (_, width) = features.dims2()?;
        if width != self.n_features {
            return Err(SentimentError::Inference(format!(
                "feature width {width} does not match classifier width {}",
                self.n_features
            )));
        }
        let features = features.to_dtype(DType::F32)?;
        Ok(self.layer.forward(&features)?)
    }

    fn predict_labels(&self, features: &Tensor) -> Result<Vec<i64>> {
        let scores = self.decision_function(features)?;
        if self.binary {
            let scores = scores.flatten_all()?.to_vec1::<f32>()?;
            return Ok(scores
                .into_iter()
                .map(|s| if s > 0.0 { self.classes[1] } else { self.classes[0] })
                .collect());
        }
        let best = scores.argmax(D::Minus1)?.to_vec1::<u32>()?;
        Ok(best
            .into_iter()
            .map(|index| self.classes[index as usize])
            .collect())
    }

    fn probabilities(&self, features: &Tensor) -> Result<Vec<Vec<f64>>> {
        let scores = self.decision_function(features)?.to_dtype(DType::F64)?;
        let probabilities = if self.binary {
            let positive = candle_nn::ops::sigmoid(&scores)?;
            let negative = positive.affine(-1.0, 1.0)?;
            Tensor::cat(&[&negative, &positive], 1)?
        } else {
            match self.multi_class {
                MultiClass::Multinomial => candle_nn::ops::softmax_last_dim(&scores)?,
                MultiClass::Ovr => {
                    let per_class = candle_nn::ops::sigmoid(&scores)?;
                    let totals = per_class.sum_keepdim(D::Minus1)?;
                    per_class.broadcast_div(&totals)?
                }
            }
        };
        Ok(probabilities.to_vec2::<f64>()?)
    }
}

/// Logistic regression: labels plus class probabilities.
#[derive(Debug, Clone)]
pub struct LogisticRegression(pub LinearModel);

/// Linear support vector classifier: labels only.
#[derive(Debug, Clone)]
pub struct LinearSvc(pub LinearModel);

impl Classifier for LogisticRegression {
    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        self.0.predict_labels(features)
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn predict_proba(&self, features: &Tensor) -> Result<Vec<Vec<f64>>> {
        self.0.probabilities(features)
    }
}

impl Classifier for LinearSvc {
    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        self.0.predict_labels(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_class(kind: LinearModelKind) -> LinearModelArtifact {
        LinearModelArtifact {
            kind,
            classes: vec![-1, 0, 1],
            coef: vec![
                vec![-2.0, 0.0, 1.5],
                vec![0.0, 1.0, 0.0],
                vec![2.0, 0.0, -1.5],
            ],
            intercept: vec![0.0, 0.1, 0.0],
            multi_class: MultiClass::Multinomial,
        }
    }

    fn features(rows: &[[f32; 3]]) -> Tensor {
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Tensor::from_vec(flat, (rows.len(), 3), &Device::Cpu).unwrap()
    }

    #[test]
    fn multiclass_predicts_argmax_class() {
        let model = LinearModel::from_artifact(three_class(LinearModelKind::LinearSvc)).unwrap();
        let x = features(&[[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);
        assert_eq!(model.predict_labels(&x).unwrap(), vec![1, -1, 0]);
    }

    #[test]
    fn multinomial_probabilities_sum_to_one() {
        let model =
            LinearModel::from_artifact(three_class(LinearModelKind::LogisticRegression)).unwrap();
        let x = features(&[[1.0, 0.0, 0.0], [0.2, 0.3, 0.4]]);
        let labels = model.predict_labels(&x).unwrap();
        let probabilities = model.probabilities(&x).unwrap();

        for (label, row) in labels.iter().zip(&probabilities) {
            assert_eq!(row.len(), 3);
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-5);
            let best = row
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| model.classes()[i])
                .unwrap();
            assert_eq!(*label, best);
        }
    }

    #[test]
    fn ovr_probabilities_are_renormalized() {
        let mut artifact = three_class(LinearModelKind::LogisticRegression);
        artifact.multi_class = MultiClass::Ovr;
        let model = LinearModel::from_artifact(artifact).unwrap();
        let probabilities = model.probabilities(&features(&[[0.5, 0.5, 0.5]])).unwrap();
        assert!((probabilities[0].iter().sum::<f64>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn binary_model_uses_sign_of_single_score() {
        let artifact = LinearModelArtifact {
            kind: LinearModelKind::LogisticRegression,
            classes: vec![0, 1],
            coef: vec![vec![1.0, -1.0]],
            intercept: vec![0.0],
            multi_class: MultiClass::Multinomial,
        };
        let model = LinearModel::from_artifact(artifact).unwrap();
        let x = Tensor::new(&[[2.0f32, 0.0], [0.0, 2.0]], &Device::Cpu).unwrap();

        assert_eq!(model.predict_labels(&x).unwrap(), vec![1, 0]);
        let probabilities = model.probabilities(&x).unwrap();
        assert!(probabilities[0][1] > 0.5 && probabilities[1][0] > 0.5);
        assert!((probabilities[0][0] + probabilities[0][1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn width_mismatch_is_an_inference_error() {
        let model = LinearModel::from_artifact(three_class(LinearModelKind::LinearSvc)).unwrap();
        let x = Tensor::new(&[[1.0f32, 0.0]], &Device::Cpu).unwrap();
        let err = model.predict_labels(&x).unwrap_err();
        assert!(matches!(err, SentimentError::Inference(_)));
    }

    #[test]
    fn kind_selects_classifier_variant() {
        let probabilistic = three_class(LinearModelKind::LogisticRegression)
            .into_classifier()
            .unwrap();
        assert!(probabilistic.supports_proba());

        let label_only = three_class(LinearModelKind::LinearSvc)
            .into_classifier()
            .unwrap();
        assert!(!label_only.supports_proba());
    }

    #[test]
    fn malformed_artifacts_are_rejected() {
        let mut one_class = three_class(LinearModelKind::LinearSvc);
        one_class.classes = vec![1];
        assert!(LinearModel::from_artifact(one_class).is_err());

        let mut ragged = three_class(LinearModelKind::LinearSvc);
        ragged.coef[1] = vec![1.0];
        assert!(LinearModel::from_artifact(ragged).is_err());

        let mut missing_intercept = three_class(LinearModelKind::LinearSvc);
        missing_intercept.intercept.pop();
        assert!(LinearModel::from_artifact(missing_intercept).is_err());

        let mut missing_row = three_class(LinearModelKind::LinearSvc);
        missing_row.coef.pop();
        assert!(LinearModel::from_artifact(missing_row).is_err());
    }

    #[test]
    fn artifact_kind_uses_snake_case() {
        let artifact: LinearModelArtifact = serde_json::from_str(
            r#"{"kind": "linear_svc", "classes": [0, 1], "coef": [[1.0]], "intercept": [0.0]}"#,
        )
        .unwrap();
        assert_eq!(artifact.kind, LinearModelKind::LinearSvc);
        assert_eq!(artifact.multi_class, MultiClass::Multinomial);
    }
}
