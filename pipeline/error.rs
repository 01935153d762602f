use thiserror::Error;

use tammeni_encoding::EncodeError;
use tammeni_scoring::ScoreError;

use crate::storage::StorageError;

/// Errors a screening submission can surface to the caller.
///
/// Normalization and reduction are total and never appear here. Translation
/// failures are recovered locally (fallback to the untranslated answer) and
/// never abort a submission.
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Missing or blank answers, or a question/answer count mismatch.
    /// Surfaced before any model call.
    #[error("input validation failed: {0}")]
    InputValidation(String),
    /// Feature width disagrees with a classifier schema. Configuration or
    /// versioning bug; never coerced.
    #[error("feature width {actual} does not match classifier schema {expected}")]
    SchemaMismatch {
        /// Width the classifier was fit on.
        expected: usize,
        /// Width actually produced.
        actual: usize,
    },
    /// The embedding or classifier collaborator failed; fatal for the
    /// submission, no partial score is produced.
    #[error("{service} service failed: {message}")]
    ExternalService {
        /// Which collaborator failed.
        service: String,
        /// Backend detail.
        message: String,
    },
    /// Classifier output failed the probability checks.
    #[error("malformed probability pair: {0}")]
    MalformedProbability(String),
    /// The response store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<EncodeError> for ScreeningError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::LengthMismatch { expected, actual } => Self::InputValidation(format!(
                "expected {expected} answers, got {actual}"
            )),
            EncodeError::Embedding(inner) => Self::ExternalService {
                service: "embedding".into(),
                message: inner.to_string(),
            },
        }
    }
}

impl From<ScoreError> for ScreeningError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::SchemaMismatch { expected, actual } => {
                Self::SchemaMismatch { expected, actual }
            }
            ScoreError::MalformedProbability(detail) => Self::MalformedProbability(detail),
            ScoreError::Classifier(inner) => Self::ExternalService {
                service: "classifier".into(),
                message: inner.to_string(),
            },
        }
    }
}
