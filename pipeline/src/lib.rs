#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Tammeni screening pipeline: one questionnaire submission in, one
//! immutable diagnosis out.
//!
//! The pipeline context owns nothing global: the embedding model, the two
//! condition classifiers, the optional dialect translator, and the response
//! store are all injected, read-only collaborators.

/// Error taxonomy surfaced to callers.
#[path = "../error.rs"]
pub mod error;

/// The fixed questionnaire and per-condition question windows.
#[path = "../questionnaire.rs"]
pub mod questionnaire;

/// Pipeline context and the screening entry points.
#[path = "../screening.rs"]
pub mod screening;

/// Response persistence collaborator.
#[path = "../storage.rs"]
pub mod storage;

/// Structured logging handle for pipeline stages.
#[path = "../telemetry.rs"]
pub mod telemetry;

/// Best-effort dialect-to-MSA translation collaborator.
#[path = "../translator.rs"]
pub mod translator;

pub use error::ScreeningError;
pub use questionnaire::{ConditionWindows, QuestionSet};
pub use screening::{ScreeningPipeline, ScreeningPipelineBuilder, Submission};
pub use storage::{
    AgeBracket, AnalysisStatus, Gender, MemoryResponseStore, RecordFilter, RecordPatch,
    ResponseRecord, ResponseStore, SortOrder, StorageError, StoredOutcome,
};
pub use telemetry::ScreeningTelemetry;
pub use translator::{
    translate_or_fallback, DialectTranslator, IdentityTranslator, TranslationError,
    TranslationOutcome,
};
