use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::score::ConditionScore;

/// Categorical outcome of one questionnaire submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosisLabel {
    /// Depression positive only.
    Depression,
    /// Anxiety positive only.
    Anxiety,
    /// Both conditions positive.
    Both,
    /// Neither condition positive.
    Healthy,
    /// Reserved for borderline outcomes; never produced by [`fuse`].
    Mixed,
}

impl DiagnosisLabel {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Depression => "Depression",
            Self::Anxiety => "Anxiety",
            Self::Both => "Both",
            Self::Healthy => "Healthy",
            Self::Mixed => "Mixed",
        }
    }
}

/// Immutable screening outcome: the categorical label plus both numeric
/// views, created once per submission.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisResult {
    /// Fused categorical label.
    pub label: DiagnosisLabel,
    /// Validated depression score.
    pub depression: ConditionScore,
    /// Validated anxiety score.
    pub anxiety: ConditionScore,
    /// Depression probability as a percentage, two decimals.
    pub depression_percent: f64,
    /// Anxiety probability as a percentage, two decimals.
    pub anxiety_percent: f64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Combines the two condition scores into a diagnosis.
///
/// Positive means the condition probability reached 0.5. The percentages
/// are attached regardless of the label so callers can always show the
/// quantitative view. Infallible: `ConditionScore` values are validated at
/// construction.
#[must_use]
pub fn fuse(depression: ConditionScore, anxiety: ConditionScore) -> DiagnosisResult {
    let label = match (depression.is_positive(), anxiety.is_positive()) {
        (true, true) => DiagnosisLabel::Both,
        (true, false) => DiagnosisLabel::Depression,
        (false, true) => DiagnosisLabel::Anxiety,
        (false, false) => DiagnosisLabel::Healthy,
    };
    DiagnosisResult {
        label,
        depression,
        anxiety,
        depression_percent: depression.percent(),
        anxiety_percent: anxiety.percent(),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(positive: f64) -> ConditionScore {
        ConditionScore::new(positive, 1.0 - positive).unwrap()
    }

    #[test]
    fn decision_table_is_complete() {
        let cases = [
            (0.9, 0.8, DiagnosisLabel::Both),
            (0.9, 0.2, DiagnosisLabel::Depression),
            (0.2, 0.8, DiagnosisLabel::Anxiety),
            (0.2, 0.1, DiagnosisLabel::Healthy),
        ];
        for (dep, anx, expected) in cases {
            assert_eq!(fuse(score(dep), score(anx)).label, expected);
        }
    }

    #[test]
    fn percentages_attach_regardless_of_label() {
        let result = fuse(score(0.2), score(0.1));
        assert_eq!(result.label, DiagnosisLabel::Healthy);
        assert!((result.depression_percent - 20.0).abs() < 1e-9);
        assert!((result.anxiety_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn reference_stub_scenario() {
        let result = fuse(score(0.9), score(0.2));
        assert_eq!(result.label, DiagnosisLabel::Depression);
        assert!((result.depression_percent - 90.0).abs() < 1e-9);
        assert!((result.anxiety_percent - 20.0).abs() < 1e-9);
    }
}
