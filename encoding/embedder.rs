use thiserror::Error;

/// Errors emitted by embedding backends.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The model service is unavailable or rejected the batch.
    #[error("embedding backend error: {0}")]
    Backend(String),
}

/// Sentence embedding model consumed as a pre-trained black box.
///
/// Implementations must be deterministic for fixed weights and must return
/// one vector of `dimension()` floats per input, in input order.
pub trait SentenceEmbedder: Send + Sync {
    /// Width of every returned vector.
    fn dimension(&self) -> usize;

    /// Embeds the whole batch in one call.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Deterministic offline embedder based on FNV-1a feature hashing of
/// boundary-padded character trigrams, L2-normalized.
///
/// Serves as the loopback double for tests and the CLI. Empty input maps to
/// a fixed unit basis vector so downstream similarities stay finite.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Creates an embedder with the given vector width (minimum 8).
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(8),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for word in text.split_whitespace() {
            let padded: Vec<char> = std::iter::once('#')
                .chain(word.chars())
                .chain(std::iter::once('#'))
                .collect();
            for window in padded.windows(3) {
                let gram: String = window.iter().collect();
                let hash = fnv1a(gram.as_bytes());
                let index = usize::try_from(hash % self.dimension as u64).unwrap_or(0);
                let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
                vector[index] += sign;
            }
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        } else {
            vector[0] = 1.0;
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl SentenceEmbedder for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
