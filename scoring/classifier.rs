use serde::{Deserialize, Serialize};
use thiserror::Error;

use tammeni_encoding::FeatureVector;

/// Errors emitted by classifier backends.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Inference call failed; fatal for the submission.
    #[error("classifier inference failed: {0}")]
    Inference(String),
}

/// Binary condition classifier consumed as a pre-trained black box.
///
/// `predict_proba` returns `(probability_positive, probability_healthy)`;
/// the caller validates the pair. The feature width is part of the model's
/// schema and must match the encoder output exactly.
pub trait ConditionClassifier: Send + Sync {
    /// Feature width the model was fit on.
    fn expected_width(&self) -> usize;

    /// Calibrated class probabilities for one feature row.
    fn predict_proba(&self, features: &FeatureVector) -> Result<(f64, f64), ClassifierError>;
}

/// Logistic model over similarity features, loadable from exported JSON.
///
/// The positive class (Depression or Anxiety) is the sigmoid output; the
/// healthy probability is its complement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One weight per question similarity, in question order.
    pub weights: Vec<f64>,
    /// Intercept.
    pub bias: f64,
}

impl LogisticModel {
    /// Parses a model from its exported JSON form.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        serde_json::from_str(raw).map_err(|err| ClassifierError::Inference(err.to_string()))
    }
}

impl ConditionClassifier for LogisticModel {
    fn expected_width(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<(f64, f64), ClassifierError> {
        let z: f64 = self
            .weights
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * f64::from(*x))
            .sum::<f64>()
            + self.bias;
        let positive = 1.0 / (1.0 + (-z).exp());
        Ok((positive, 1.0 - positive))
    }
}

/// Stub classifier returning a fixed probability pair.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    width: usize,
    positive: f64,
}

impl FixedClassifier {
    /// Creates a stub expecting `width` features and always answering
    /// `(positive, 1 - positive)`.
    #[must_use]
    pub const fn new(width: usize, positive: f64) -> Self {
        Self { width, positive }
    }
}

impl ConditionClassifier for FixedClassifier {
    fn expected_width(&self) -> usize {
        self.width
    }

    fn predict_proba(&self, _features: &FeatureVector) -> Result<(f64, f64), ClassifierError> {
        Ok((self.positive, 1.0 - self.positive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_model_round_trips_json() {
        let raw = r#"{ "weights": [1.5, -0.75, 0.25], "bias": -0.5 }"#;
        let model = LogisticModel::from_json(raw).unwrap();
        assert_eq!(model.expected_width(), 3);

        let features = FeatureVector::new(vec![0.9, 0.1, 0.5]);
        let (positive, healthy) = model.predict_proba(&features).unwrap();
        assert!((positive + healthy - 1.0).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&positive));
    }

    #[test]
    fn higher_similarity_raises_positive_probability() {
        let model = LogisticModel {
            weights: vec![2.0, 2.0],
            bias: -1.0,
        };
        let (low, _) = model
            .predict_proba(&FeatureVector::new(vec![0.0, 0.0]))
            .unwrap();
        let (high, _) = model
            .predict_proba(&FeatureVector::new(vec![1.0, 1.0]))
            .unwrap();
        assert!(high > low);
    }

    #[test]
    fn fixed_classifier_echoes_configuration() {
        let stub = FixedClassifier::new(3, 0.9);
        let (positive, healthy) = stub
            .predict_proba(&FeatureVector::new(vec![0.0, 0.0, 0.0]))
            .unwrap();
        assert!((positive - 0.9).abs() < f64::EPSILON);
        assert!((healthy - 0.1).abs() < f64::EPSILON);
    }
}
