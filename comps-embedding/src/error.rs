//! Error types for embedding operations

use comps_core::CompsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors raised while generating embeddings
///
/// Either variant aborts the whole embedding call; no partial vector list
/// is ever returned.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("OpenAI API error during batch {index}: {source}")]
    Batch {
        index: usize,
        #[source]
        source: async_openai::error::OpenAIError,
    },

    #[error("Batch {index} returned {actual} embeddings for {expected} inputs")]
    BatchShape {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

impl EmbeddingError {
    /// Zero-based index of the batch that failed
    pub fn batch_index(&self) -> usize {
        match self {
            EmbeddingError::Batch { index, .. } => *index,
            EmbeddingError::BatchShape { index, .. } => *index,
        }
    }
}

impl From<EmbeddingError> for CompsError {
    fn from(err: EmbeddingError) -> Self {
        let batch = err.batch_index();
        let message = match err {
            EmbeddingError::Batch { source, .. } => source.to_string(),
            EmbeddingError::BatchShape {
                expected, actual, ..
            } => format!("{} embeddings returned for {} inputs", actual, expected),
        };
        CompsError::embedding(batch, message)
    }
}
