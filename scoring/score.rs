use serde::Serialize;
use thiserror::Error;

use tammeni_encoding::FeatureVector;

use crate::classifier::{ClassifierError, ConditionClassifier};

const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// The two screened conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Condition {
    /// Major depressive indicators (questions 1-3).
    Depression,
    /// Generalized anxiety indicators (questions 3-6).
    Anxiety,
}

impl Condition {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Depression => "Depression",
            Self::Anxiety => "Anxiety",
        }
    }
}

/// Errors emitted while scoring a feature vector.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Feature width disagrees with the model schema. Configuration bug,
    /// never coerced.
    #[error("feature width {actual} does not match classifier schema {expected}")]
    SchemaMismatch {
        /// Width the classifier was fit on.
        expected: usize,
        /// Width actually supplied.
        actual: usize,
    },
    /// Classifier output left [0, 1] or the pair does not sum to one.
    #[error("malformed probability pair: {0}")]
    MalformedProbability(String),
    /// The classifier collaborator failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Validated probability pair for one condition.
///
/// Only constructible through [`ConditionScore::new`], so a value of this
/// type always satisfies the [0, 1] bounds and sums to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionScore {
    positive: f64,
    healthy: f64,
}

impl ConditionScore {
    /// Validates and wraps a probability pair.
    pub fn new(positive: f64, healthy: f64) -> Result<Self, ScoreError> {
        for (name, value) in [("positive", positive), ("healthy", healthy)] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ScoreError::MalformedProbability(format!(
                    "{name} probability {value} outside [0, 1]"
                )));
            }
        }
        if (positive + healthy - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(ScoreError::MalformedProbability(format!(
                "probabilities sum to {}",
                positive + healthy
            )));
        }
        Ok(Self { positive, healthy })
    }

    /// Probability of the screened condition.
    #[must_use]
    pub const fn positive(&self) -> f64 {
        self.positive
    }

    /// Probability of the healthy class.
    #[must_use]
    pub const fn healthy(&self) -> f64 {
        self.healthy
    }

    /// Predicted label: positive when the condition probability reaches 0.5.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.positive >= 0.5
    }

    /// Condition probability as a percentage, rounded to two decimals.
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.positive * 10_000.0).round() / 100.0
    }
}

/// Runs a classifier over a feature vector with schema and output checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    /// Scores one condition.
    ///
    /// Fails with `SchemaMismatch` before touching the model when the widths
    /// disagree, and with `MalformedProbability` when the model output is
    /// corrupt; silent coercion here would yield clinically misleading
    /// results.
    pub fn score(
        classifier: &dyn ConditionClassifier,
        features: &FeatureVector,
    ) -> Result<ConditionScore, ScoreError> {
        let expected = classifier.expected_width();
        if features.len() != expected {
            return Err(ScoreError::SchemaMismatch {
                expected,
                actual: features.len(),
            });
        }
        let (positive, healthy) = classifier.predict_proba(features)?;
        ConditionScore::new(positive, healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FixedClassifier;

    struct CorruptClassifier;

    impl ConditionClassifier for CorruptClassifier {
        fn expected_width(&self) -> usize {
            3
        }

        fn predict_proba(&self, _: &FeatureVector) -> Result<(f64, f64), ClassifierError> {
            Ok((1.4, -0.4))
        }
    }

    fn features(width: usize) -> FeatureVector {
        FeatureVector::new(vec![0.5; width])
    }

    #[test]
    fn score_checks_width_before_inference() {
        let err = ScoreEngine::score(&FixedClassifier::new(3, 0.9), &features(4)).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::SchemaMismatch {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[test]
    fn score_rejects_corrupt_probabilities() {
        let err = ScoreEngine::score(&CorruptClassifier, &features(3)).unwrap_err();
        assert!(matches!(err, ScoreError::MalformedProbability(_)));
    }

    #[test]
    fn probabilities_conserve_mass() {
        let score = ScoreEngine::score(&FixedClassifier::new(3, 0.73), &features(3)).unwrap();
        assert!((score.positive() + score.healthy() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn percent_rounds_to_two_decimals() {
        let third = 1.0 / 3.0;
        let score = ConditionScore::new(third, 1.0 - third).unwrap();
        assert!((score.percent() - 33.33).abs() < 1e-9);
        let score = ConditionScore::new(0.9, 0.1).unwrap();
        assert!((score.percent() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn new_rejects_out_of_range_values() {
        assert!(ConditionScore::new(-0.1, 1.1).is_err());
        assert!(ConditionScore::new(0.6, 0.6).is_err());
        assert!(ConditionScore::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn decision_threshold_is_half() {
        assert!(ConditionScore::new(0.5, 0.5).unwrap().is_positive());
        assert!(!ConditionScore::new(0.49, 0.51).unwrap().is_positive());
    }
}
