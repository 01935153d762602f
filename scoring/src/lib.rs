#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Classification scoring and diagnosis fusion for the Tammeni pipeline.

/// Classifier interface, the serde-loadable logistic model, and test stubs.
#[path = "../classifier.rs"]
pub mod classifier;

/// Probability validation and the score engine.
#[path = "../score.rs"]
pub mod score;

/// Fusion of the two condition scores into a diagnosis.
#[path = "../fusion.rs"]
pub mod fusion;

pub use classifier::{ClassifierError, ConditionClassifier, FixedClassifier, LogisticModel};
pub use fusion::{fuse, DiagnosisLabel, DiagnosisResult};
pub use score::{Condition, ConditionScore, ScoreEngine, ScoreError};
