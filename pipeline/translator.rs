use async_trait::async_trait;
use thiserror::Error;

/// Errors emitted by the translation collaborator.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Provider unavailable or rejected the request.
    #[error("translation service error: {0}")]
    Service(String),
}

/// Dialect-to-Modern-Standard-Arabic translation service, consumed
/// best-effort: a failure here must never abort the pipeline.
#[async_trait]
pub trait DialectTranslator: Send + Sync {
    /// Rewrites dialectal text in standard Arabic.
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// What the pipeline actually used for an answer.
///
/// A distinct variant for the fallback path keeps service degradation
/// visible to callers instead of being swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The service answered; the translated text is used.
    Translated(String),
    /// The service failed; the untranslated input is used.
    FallbackUsed {
        /// Original text carried forward.
        text: String,
        /// Failure detail for telemetry.
        reason: String,
    },
}

impl TranslationOutcome {
    /// Text the pipeline continues with.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Translated(text) | Self::FallbackUsed { text, .. } => text,
        }
    }

    /// True when the fallback path was taken.
    #[must_use]
    pub const fn used_fallback(&self) -> bool {
        matches!(self, Self::FallbackUsed { .. })
    }
}

/// Translates one answer, degrading to the original text on failure.
///
/// Blank input short-circuits without a service call.
pub async fn translate_or_fallback(
    translator: &dyn DialectTranslator,
    text: &str,
) -> TranslationOutcome {
    if text.trim().is_empty() {
        return TranslationOutcome::Translated(String::new());
    }
    match translator.translate(text).await {
        Ok(translated) => TranslationOutcome::Translated(translated),
        Err(err) => TranslationOutcome::FallbackUsed {
            text: text.to_string(),
            reason: err.to_string(),
        },
    }
}

/// Pass-through translator for tests and deployments without the service.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

#[async_trait]
impl DialectTranslator for IdentityTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DownTranslator;

    #[async_trait]
    impl DialectTranslator for DownTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslationError> {
            Err(TranslationError::Service("model offline".into()))
        }
    }

    #[tokio::test]
    async fn failure_falls_back_to_original_text() {
        let outcome = translate_or_fallback(&DownTranslator, "وش فيك؟").await;
        assert!(outcome.used_fallback());
        assert_eq!(outcome.text(), "وش فيك؟");
    }

    #[tokio::test]
    async fn success_uses_translation() {
        let outcome = translate_or_fallback(&IdentityTranslator, "ماذا بك؟").await;
        assert!(!outcome.used_fallback());
        assert_eq!(outcome.text(), "ماذا بك؟");
    }

    #[tokio::test]
    async fn blank_input_skips_the_service() {
        let outcome = translate_or_fallback(&DownTranslator, "   ").await;
        assert!(!outcome.used_fallback());
        assert_eq!(outcome.text(), "");
    }
}
