//! Cosine similarity ranking

use ndarray::{Array1, Array2, ArrayView1};
use tracing::debug;

use crate::types::{EmbeddingVector, ScoredIndex};

/// Calculate cosine similarity between two embeddings
///
/// Formula: cos(θ) = (A · B) / (||A|| ||B||)
///
/// Returns 0.0 for zero vectors or mismatched dimensions.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        debug!(
            "Embedding dimension mismatch ({} vs {}), scoring 0.0",
            a.len(),
            b.len()
        );
        return 0.0;
    }

    let a_view = ArrayView1::from(a);
    let b_view = ArrayView1::from(b);

    let dot_product = a_view.dot(&b_view);
    let norm_a = a_view.dot(&a_view).sqrt();
    let norm_b = b_view.dot(&b_view).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot_product / (norm_a * norm_b)) as f64
}

/// Rank reference embeddings against a query by cosine similarity
///
/// Reference vectors are stacked into a matrix and L2-row-normalized, the
/// query is normalized independently, and scores are the dot product of the
/// matrix with the query vector. The result is sorted by descending score with ties keeping the
/// reference set's original order, then truncated to `top_n`.
///
/// A reference vector whose dimension differs from the query's scores 0.0
/// instead of being dropped, so every record stays rankable.
pub fn rank_by_similarity(
    reference: &[EmbeddingVector],
    query: &[f32],
    top_n: usize,
) -> Vec<ScoredIndex> {
    if reference.is_empty() || query.is_empty() {
        return Vec::new();
    }

    let dim = query.len();
    let mut matrix = Array2::<f32>::zeros((reference.len(), dim));
    for (row, embedding) in reference.iter().enumerate() {
        if embedding.len() == dim {
            matrix.row_mut(row).assign(&ArrayView1::from(embedding.as_slice()));
        } else {
            debug!(
                "Reference embedding {} has dimension {} (query has {}), scoring 0.0",
                row,
                embedding.len(),
                dim
            );
        }
    }

    // L2-normalize each row; zero rows stay zero and score 0.0
    for mut row in matrix.rows_mut() {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    let mut query_vec = Array1::from_vec(query.to_vec());
    let query_norm = query_vec.dot(&query_vec).sqrt();
    if query_norm > 0.0 {
        query_vec.mapv_inplace(|v| v / query_norm);
    }

    let scores = matrix.dot(&query_vec);

    let mut ranked: Vec<ScoredIndex> = scores
        .iter()
        .enumerate()
        .map(|(index, score)| ScoredIndex {
            index,
            score: f64::from(*score),
        })
        .collect();

    // Stable sort: equal scores keep dataset order
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);

    ranked
}
