use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tammeni_text::{normalize, reduce};

use crate::embedder::{EmbeddingError, SentenceEmbedder};

/// Positional vector of question/answer cosine similarities.
///
/// Index `i` always refers to question `i` against the matching answer;
/// values lie in [-1, 1]. The width is fixed at construction and never
/// reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// Wraps raw similarity values.
    #[must_use]
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Number of question/answer pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no pairs were encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Similarity at pair index `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f32> {
        self.values.get(i).copied()
    }

    /// All similarities in question order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Errors emitted while encoding similarity features.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Question and answer counts disagree.
    #[error("expected {expected} answers, got {actual}")]
    LengthMismatch {
        /// Number of questions supplied.
        expected: usize,
        /// Number of answers supplied.
        actual: usize,
    },
    /// The embedding collaborator failed; fatal for the submission.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Encodes question/answer pairs into similarity features.
///
/// Each side goes through the full cleaning pipeline (normalize then
/// reduce), is embedded in a single batch call, and contributes the
/// diagonal cosine only. Text that cleans down to an empty string is still
/// embedded; the embedder guarantees a deterministic vector for it.
#[derive(Clone)]
pub struct SimilarityEncoder {
    embedder: Arc<dyn SentenceEmbedder>,
}

impl SimilarityEncoder {
    /// Creates an encoder around an injected embedding model.
    #[must_use]
    pub fn new(embedder: Arc<dyn SentenceEmbedder>) -> Self {
        Self { embedder }
    }

    /// Encodes one respondent's answers against the questions.
    pub fn encode_pairs(
        &self,
        questions: &[String],
        answers: &[String],
    ) -> Result<FeatureVector, EncodeError> {
        if questions.len() != answers.len() {
            return Err(EncodeError::LengthMismatch {
                expected: questions.len(),
                actual: answers.len(),
            });
        }
        let question_embeddings = self.embedder.embed_batch(&prepare_all(questions))?;
        Ok(self.encode_against(&question_embeddings, answers)?)
    }

    /// Encodes a table of respondents, reusing the question embeddings.
    pub fn encode_table(
        &self,
        questions: &[String],
        rows: &[Vec<String>],
    ) -> Result<Vec<FeatureVector>, EncodeError> {
        let question_embeddings = self.embedder.embed_batch(&prepare_all(questions))?;
        let mut table = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() != questions.len() {
                return Err(EncodeError::LengthMismatch {
                    expected: questions.len(),
                    actual: row.len(),
                });
            }
            table.push(self.encode_against(&question_embeddings, row)?);
        }
        Ok(table)
    }

    fn encode_against(
        &self,
        question_embeddings: &[Vec<f32>],
        answers: &[String],
    ) -> Result<FeatureVector, EmbeddingError> {
        let answer_embeddings = self.embedder.embed_batch(&prepare_all(answers))?;
        let values = question_embeddings
            .iter()
            .zip(&answer_embeddings)
            .map(|(q, a)| cosine(q, a))
            .collect();
        Ok(FeatureVector::new(values))
    }
}

fn prepare_all(texts: &[String]) -> Vec<String> {
    texts.iter().map(|text| reduce(&normalize(text))).collect()
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::HashEmbedder;

    fn encoder() -> SimilarityEncoder {
        SimilarityEncoder::new(Arc::new(HashEmbedder::default()))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn similarities_stay_in_bounds() {
        let questions = strings(&["هل تشعر بالحزن؟", "هل تعاني من القلق؟"]);
        let answers = strings(&["نعم أشعر بحزن شديد", "لا أبدا"]);
        let features = encoder().encode_pairs(&questions, &answers).unwrap();
        assert_eq!(features.len(), 2);
        for value in features.values() {
            assert!((-1.0..=1.0).contains(value));
        }
    }

    #[test]
    fn identical_text_scores_maximal() {
        let question = strings(&["هل تشعر بالحزن؟"]);
        let features = encoder().encode_pairs(&question, &question).unwrap();
        assert!(features.get(0).unwrap() > 0.999);
    }

    #[test]
    fn output_is_positionally_aligned() {
        let questions = strings(&["سؤال الحزن", "سؤال القلق", "سؤال النوم"]);
        let answers = strings(&["جواب الحزن", "جواب القلق", "جواب النوم"]);
        let base = encoder().encode_pairs(&questions, &answers).unwrap();

        let mut changed = answers.clone();
        changed[1] = "شيء مختلف تماما عن السابق".to_string();
        let shifted = encoder().encode_pairs(&questions, &changed).unwrap();

        assert_eq!(base.get(0), shifted.get(0));
        assert_ne!(base.get(1), shifted.get(1));
        assert_eq!(base.get(2), shifted.get(2));
    }

    #[test]
    fn count_mismatch_is_rejected_before_any_model_call() {
        let err = encoder()
            .encode_pairs(&strings(&["س1", "س2"]), &strings(&["ج1"]))
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn empty_answer_still_produces_finite_similarity() {
        let features = encoder()
            .encode_pairs(&strings(&["هل تشعر بالحزن؟"]), &strings(&[""]))
            .unwrap();
        let value = features.get(0).unwrap();
        assert!(value.is_finite());
        assert!((-1.0..=1.0).contains(&value));
    }

    #[test]
    fn table_rows_align_with_single_row_encoding() {
        let questions = strings(&["س1", "س2"]);
        let rows = vec![
            strings(&["اشعر بالحزن", "اشعر بالقلق"]),
            strings(&["انا بخير", "كل شيء جيد"]),
        ];
        let table = encoder().encode_table(&questions, &rows).unwrap();
        assert_eq!(table.len(), 2);
        let single = encoder().encode_pairs(&questions, &rows[0]).unwrap();
        assert_eq!(table[0], single);
    }
}
