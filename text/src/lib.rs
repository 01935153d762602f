#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Arabic text preparation for the Tammeni screening pipeline.
//!
//! Both entry points are total functions over strings: `normalize` performs
//! character-level cleanup, `reduce` turns normalized text into a
//! stopword-free, stemmed token sequence. Neither can fail.

/// Character-level cleanup of raw answers.
#[path = "../normalizer.rs"]
pub mod normalizer;

/// Stopword filtering and light root stemming.
#[path = "../stemmer.rs"]
pub mod stemmer;

/// Fixed Arabic stopword set.
#[path = "../stopwords.rs"]
pub mod stopwords;

pub use normalizer::normalize;
pub use stemmer::{reduce, stem};
pub use stopwords::is_stopword;
