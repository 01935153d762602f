use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use tammeni_encoding::{FeatureVector, SentenceEmbedder, SimilarityEncoder};
use tammeni_logging::LogLevel;
use tammeni_scoring::{fuse, ConditionClassifier, DiagnosisResult, ScoreEngine};
use tammeni_text::{normalize, reduce};

use crate::error::ScreeningError;
use crate::questionnaire::{ConditionWindows, QuestionSet};
use crate::storage::{
    AgeBracket, Gender, RecordPatch, ResponseRecord, ResponseStore, StoredOutcome,
};
use crate::telemetry::ScreeningTelemetry;
use crate::translator::{translate_or_fallback, DialectTranslator};

/// One respondent's filled questionnaire, as received from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Respondent handle.
    pub username: String,
    /// Respondent gender.
    pub gender: Gender,
    /// Respondent age bracket.
    pub age_bracket: AgeBracket,
    /// One answer per question, in question order.
    pub answers: Vec<String>,
}

/// Assembles a [`ScreeningPipeline`] and checks the configuration once, so
/// schema problems surface at startup instead of on the first submission.
pub struct ScreeningPipelineBuilder {
    embedder: Arc<dyn SentenceEmbedder>,
    depression: Arc<dyn ConditionClassifier>,
    anxiety: Arc<dyn ConditionClassifier>,
    questions: QuestionSet,
    windows: ConditionWindows,
    translator: Option<Arc<dyn DialectTranslator>>,
    telemetry: Option<ScreeningTelemetry>,
}

impl ScreeningPipelineBuilder {
    /// Starts a builder with the three mandatory models and the deployed
    /// questionnaire.
    #[must_use]
    pub fn new(
        embedder: Arc<dyn SentenceEmbedder>,
        depression: Arc<dyn ConditionClassifier>,
        anxiety: Arc<dyn ConditionClassifier>,
    ) -> Self {
        Self {
            embedder,
            depression,
            anxiety,
            questions: QuestionSet::deployed(),
            windows: ConditionWindows::deployed(),
            translator: None,
            telemetry: None,
        }
    }

    /// Replaces the questionnaire.
    #[must_use]
    pub fn questions(mut self, questions: QuestionSet) -> Self {
        self.questions = questions;
        self
    }

    /// Replaces the per-condition question windows.
    #[must_use]
    pub fn windows(mut self, windows: ConditionWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Attaches the optional dialect translator.
    #[must_use]
    pub fn translator(mut self, translator: Arc<dyn DialectTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Attaches the optional structured log.
    #[must_use]
    pub fn telemetry(mut self, telemetry: ScreeningTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Validates the configuration and builds the pipeline.
    pub fn build(self) -> Result<ScreeningPipeline, ScreeningError> {
        self.windows.validate(self.questions.len())?;
        for (window, classifier) in [
            (&self.windows.depression, self.depression.as_ref()),
            (&self.windows.anxiety, self.anxiety.as_ref()),
        ] {
            if classifier.expected_width() != window.len() {
                return Err(ScreeningError::SchemaMismatch {
                    expected: classifier.expected_width(),
                    actual: window.len(),
                });
            }
        }
        Ok(ScreeningPipeline {
            encoder: SimilarityEncoder::new(self.embedder),
            depression: self.depression,
            anxiety: self.anxiety,
            questions: self.questions,
            windows: self.windows,
            translator: self.translator,
            telemetry: self.telemetry,
        })
    }
}

/// The screening pipeline: validation, translation, similarity encoding,
/// per-condition scoring and diagnosis fusion over one submission.
///
/// All collaborators are injected and read-only; the pipeline itself holds
/// no mutable state and can be shared across tasks.
pub struct ScreeningPipeline {
    encoder: SimilarityEncoder,
    depression: Arc<dyn ConditionClassifier>,
    anxiety: Arc<dyn ConditionClassifier>,
    questions: QuestionSet,
    windows: ConditionWindows,
    translator: Option<Arc<dyn DialectTranslator>>,
    telemetry: Option<ScreeningTelemetry>,
}

impl std::fmt::Debug for ScreeningPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreeningPipeline").finish_non_exhaustive()
    }
}

impl ScreeningPipeline {
    /// The questionnaire this pipeline screens against.
    #[must_use]
    pub const fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Screens one submission to an immutable diagnosis.
    ///
    /// Validation failures and collaborator outages surface as errors; a
    /// translation outage alone degrades to the untranslated answers and the
    /// submission still completes.
    pub async fn screen(&self, submission: &Submission) -> Result<DiagnosisResult, ScreeningError> {
        self.validate(submission)?;
        let answers = self.translated_answers(&submission.answers).await;
        self.note_degenerate_answers(&answers);

        let depression_features = self.window_features(&answers, self.windows.depression.clone())?;
        let anxiety_features = self.window_features(&answers, self.windows.anxiety.clone())?;

        let depression = ScoreEngine::score(self.depression.as_ref(), &depression_features)
            .map_err(ScreeningError::from)?;
        let anxiety = ScoreEngine::score(self.anxiety.as_ref(), &anxiety_features)
            .map_err(ScreeningError::from)?;

        let result = fuse(depression, anxiety);
        self.note(
            LogLevel::Info,
            "fuse",
            "diagnosis ready",
            &json!({
                "username": submission.username,
                "label": result.label.label(),
                "depression_percent": result.depression_percent,
                "anxiety_percent": result.anxiety_percent,
            }),
        );
        Ok(result)
    }

    /// Persists the submission, screens it, and writes the outcome back.
    ///
    /// The record is inserted as pending before any model call, so a failed
    /// analysis still leaves the raw answers queryable.
    pub async fn screen_and_store(
        &self,
        store: &dyn ResponseStore,
        submission: &Submission,
    ) -> Result<(Uuid, DiagnosisResult), ScreeningError> {
        self.validate(submission)?;
        let record = ResponseRecord::pending(
            submission.username.clone(),
            submission.gender,
            submission.age_bracket,
            submission.answers.clone(),
        );
        let id = store.insert(record).await?;
        let result = self.screen(submission).await?;
        store
            .update_one(id, RecordPatch::analyzed(StoredOutcome::from(&result)))
            .await?;
        Ok((id, result))
    }

    fn validate(&self, submission: &Submission) -> Result<(), ScreeningError> {
        if submission.username.trim().is_empty() {
            return Err(ScreeningError::InputValidation(
                "username must not be blank".to_string(),
            ));
        }
        if submission.answers.len() != self.questions.len() {
            return Err(ScreeningError::InputValidation(format!(
                "expected {} answers, got {}",
                self.questions.len(),
                submission.answers.len()
            )));
        }
        for (index, answer) in submission.answers.iter().enumerate() {
            if answer.trim().is_empty() {
                return Err(ScreeningError::InputValidation(format!(
                    "answer {} is blank",
                    index + 1
                )));
            }
        }
        Ok(())
    }

    async fn translated_answers(&self, answers: &[String]) -> Vec<String> {
        let Some(translator) = &self.translator else {
            return answers.to_vec();
        };
        let mut translated = Vec::with_capacity(answers.len());
        for (index, answer) in answers.iter().enumerate() {
            let outcome = translate_or_fallback(translator.as_ref(), answer).await;
            if let crate::translator::TranslationOutcome::FallbackUsed { reason, .. } = &outcome {
                self.note(
                    LogLevel::Warn,
                    "translate",
                    "fallback to raw answer",
                    &json!({ "question_index": index, "reason": reason }),
                );
            }
            translated.push(outcome.text().to_string());
        }
        translated
    }

    fn note_degenerate_answers(&self, answers: &[String]) {
        for (index, answer) in answers.iter().enumerate() {
            if reduce(&normalize(answer)).is_empty() {
                self.note(
                    LogLevel::Warn,
                    "clean",
                    "answer reduced to empty text",
                    &json!({ "question_index": index }),
                );
            }
        }
    }

    fn window_features(
        &self,
        answers: &[String],
        window: std::ops::Range<usize>,
    ) -> Result<FeatureVector, ScreeningError> {
        let features = self
            .encoder
            .encode_pairs(&self.questions.questions()[window.clone()], &answers[window])?;
        Ok(features)
    }

    fn note(&self, level: LogLevel, stage: &str, message: &str, fields: &serde_json::Value) {
        if let Some(telemetry) = &self.telemetry {
            let _ = telemetry.log(level, stage, message, fields);
        }
    }
}
