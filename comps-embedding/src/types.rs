//! Core types for embeddings

use serde::{Deserialize, Serialize};

/// Embedding vector (1536 dimensions for text-embedding-ada-002)
pub type EmbeddingVector = Vec<f32>;

/// One reference row's position in a similarity ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredIndex {
    /// Index of the row in the reference set's original order
    pub index: usize,
    /// Cosine similarity against the query (-1.0 to 1.0)
    pub score: f64,
}
