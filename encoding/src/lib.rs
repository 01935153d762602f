#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Semantic similarity encoding for the Tammeni screening pipeline.
//!
//! Questions and answers are cleaned, embedded in batches through a
//! [`SentenceEmbedder`], and compared pairwise (index against index, never
//! the full cross-similarity matrix).

/// Sentence embedding interface and the deterministic offline embedder.
#[path = "../embedder.rs"]
pub mod embedder;

/// Paired cosine similarity and the positional feature vector.
#[path = "../similarity.rs"]
pub mod similarity;

pub use embedder::{EmbeddingError, HashEmbedder, SentenceEmbedder};
pub use similarity::{EncodeError, FeatureVector, SimilarityEncoder};
